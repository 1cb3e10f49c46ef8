pub mod analyze;
pub mod compare;
pub mod grade;
pub mod init;
pub mod scenarios;
pub mod serve;
pub mod validate;
