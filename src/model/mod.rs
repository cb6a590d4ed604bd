pub mod attendance;
pub mod company;
