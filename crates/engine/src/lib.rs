//! BSK history engine: domain types, the transaction classifier, filter/query
//! composition, CSV export and the sea-orm backed history queries.

pub use classify::{BadgeTone, DisplayDescriptor, Icon, StatusBadge, Tone, classify, status_badge};
pub use error::EngineError;
pub use export::{export_filename, write_csv};
pub use filter::{
    BalanceFilter, DEFAULT_PAGE_SIZE, DirectionFilter, FilterState, HistoryQuery,
};
pub use metadata::TxMetadata;
pub use money::Bsk;
pub use ops::Engine;
pub use transaction::{BalanceType, NewTransaction, Statistics, Transaction};

mod classify;
pub mod entity;
mod error;
mod export;
mod filter;
mod metadata;
mod money;
mod ops;
mod transaction;

type ResultEngine<T> = Result<T, EngineError>;
