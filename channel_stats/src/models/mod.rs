pub mod bundle;
pub mod channel;
pub mod history;
pub mod records;
pub mod video;
