use dtl_client::Session;

pub(crate) async fn login(session: &Session, email: &str) -> anyhow::Result<()> {
    let response = session.login(email).await?;
    println!("Logged in as {}", response.user_id);
    Ok(())
}

pub(crate) async fn register(session: &Session, name: &str, email: &str) -> anyhow::Result<()> {
    let response = session.register(name, email).await?;
    let message = response
        .message
        .unwrap_or_else(|| "Registration successful.".to_string());
    println!("{message}");
    println!("Log in with `dtl login --email {}`", email.trim());
    Ok(())
}

pub(crate) fn logout(session: &Session) -> anyhow::Result<()> {
    session.logout()?;
    println!("Logged out");
    Ok(())
}
