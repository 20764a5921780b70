use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("Opacity data does not match the declared buffer size")]
    InvalidBufferShape,
    #[error("Zone index out of range")]
    InvalidZone,
    #[error("No overlay registered for this card")]
    UnknownCard,
    #[error("Prize table has no drawable outcome or an empty range")]
    InvalidPrizeTable,
}

pub type Result<T> = core::result::Result<T, CardError>;
