pub mod ids;
pub mod init;
pub mod videos;
