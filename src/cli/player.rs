//! Player commands

use anyhow::Result;

use habit_idle::engine::Command;

use super::AppContext;

pub fn player_rename_command(ctx: &AppContext, name: String) -> Result<()> {
    let mut engine = ctx.engine()?;
    let events = engine.dispatch(Command::SetPlayerName(name))?;
    if events.is_empty() {
        println!("Name unchanged.");
    } else {
        println!("You are now {}.", engine.state().player.name);
    }
    Ok(())
}

pub fn player_avatar_command(ctx: &AppContext, avatar: String) -> Result<()> {
    let mut engine = ctx.engine()?;
    let events = engine.dispatch(Command::SetPlayerAvatar(avatar))?;
    if events.is_empty() {
        println!("Avatar unchanged.");
    } else {
        println!("Avatar set to {}.", engine.state().player.avatar);
    }
    Ok(())
}
