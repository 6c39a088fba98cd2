mod payload;

pub use payload::UserInfo;
