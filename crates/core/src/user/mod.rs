mod operations;
mod requests;
mod types;

pub use operations::{new_user, replacement_user};
pub use requests::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse, GetUserRequest,
    GetUserResponse, ListUsersRequest, ListUsersResponse, UpdateUserRequest, UpdateUserResponse,
};
pub use types::User;
