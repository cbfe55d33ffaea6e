mod login_user;
mod register_user;

pub use login_user::{
    __path_login_user_handler, login_user_handler, LoginRequestDto, LoginResponse,
};
pub use register_user::{
    __path_register_user_handler, register_user_handler, RegisterUserRequestDto,
};
