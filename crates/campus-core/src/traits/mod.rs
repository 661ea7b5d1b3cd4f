//! Repository traits (ports) for the data-access layer

mod repositories;

pub use repositories::{
    NewUser, RefreshTokenRepository, RepoResult, UserProfileUpdate, UserRepository,
};
