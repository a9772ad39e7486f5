#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    /// Already hashed; repositories never see plaintext passwords.
    pub password_hash: String,
}
