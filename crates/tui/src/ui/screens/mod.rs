pub mod browse;
pub mod dashboard;
pub mod donations;
pub mod history;
