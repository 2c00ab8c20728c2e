use super::*;

/// Registers a signed in user on first contact.
pub fn ensure_user(connections: &sqlite::Connections, user: User) -> Result<User> {
    let mut connection = connections.exclusive()?;
    let user = connection.transaction(|conn| usecases::ensure_user(conn, user))?;
    Ok(user)
}

/// Loads the profile of a signed in user, registering the user if needed.
pub fn load_user_profile(
    connections: &sqlite::Connections,
    user: User,
) -> Result<usecases::UserProfile> {
    let user = ensure_user(connections, user)?;
    let connection = connections.shared()?;
    Ok(usecases::user_profile(&connection, user.id.as_str())?)
}
