pub mod admin;
pub mod client;
pub mod error;
pub mod memory;
pub mod supabase;

pub use admin::AdminApi;
pub use client::{
    MonthPatch, MonthRow, NewMonthRow, NewStrategyRow, NewTradeRow, StrategyPatch, StrategyRow,
    TableStore, TradePatch, TradeRow,
};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use supabase::{ApiKeyRecord, SupabaseStore};
