use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use flicklog_models::UserProfile;
use serde_json::json;

pub fn run_login(username: String, output: &Output) -> Result<()> {
    let username = username.trim().to_string();
    if username.is_empty() {
        output.error("Username cannot be empty");
        return Ok(());
    }

    let ctx = AppContext::init()?;
    ctx.library.store().save_profile(&UserProfile::new(&username)).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!("Logged in as {}", username));
    Ok(())
}

pub fn run_logout(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    ctx.library.store().clear_profile().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success("Logged out");
    Ok(())
}

pub fn run_whoami(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    match ctx.library.store().load_profile().map_err(|e| color_eyre::eyre::eyre!("{}", e))? {
        Some(profile) => {
            if output.is_human() {
                output.println(&profile.username);
            } else {
                output.json(&json!({ "username": profile.username }));
            }
        }
        None => output.info("Not logged in"),
    }
    Ok(())
}
