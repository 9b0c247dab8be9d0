pub mod loan_activity_logger;
pub mod loan_register;
pub mod statistics;

pub use loan_activity_logger::LoanActivityLogger;
pub use loan_register::{LoanRegister, OverdueLoan};
pub use statistics::{ActivitySnapshot, StatisticsObserver};
