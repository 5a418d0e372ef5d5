//! Player lookup command implementation

use std::fmt::{self, Write};

use crate::{
    cli::types::View,
    clash::{
        http::UpstreamClient,
        types::{Achievement, Player, Unit},
    },
    config::UpstreamConfig,
    Result,
};

/// Parameters for the player lookup command
#[derive(Debug, Clone)]
pub struct PlayerLookupParams {
    pub tag: String,
    pub as_json: bool,
    pub view: View,
    pub base_url: Option<String>,
}

/// Handle the player command: one lookup, printed to stdout.
///
/// Only the upstream settings are read, so server-side variables never
/// affect this path. On failure the upstream details (if any) go to stderr
/// and the lookup error is returned for the caller to report.
pub async fn handle_player_lookup(params: PlayerLookupParams) -> Result<()> {
    let config = UpstreamConfig::from_env()?.with_base_url(params.base_url.clone());
    let client = UpstreamClient::from_config(&config)?;

    let output = lookup_and_render(&client, &params).await?;
    print!("{}", output);
    Ok(())
}

/// Perform the lookup and render it the way the command prints it.
pub async fn lookup_and_render(
    client: &UpstreamClient,
    params: &PlayerLookupParams,
) -> Result<String> {
    let document = match client.lookup(Some(params.tag.as_str())).await {
        Ok(document) => document,
        Err(err) => {
            if let Some(details) = err.details() {
                eprintln!("Details:\n{}", serde_json::to_string_pretty(&details)?);
            }
            return Err(err.into());
        }
    };

    if params.as_json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&document)?));
    }

    let player: Player = serde_json::from_value(document)?;
    render_player(&player, params.view)
}

/// Render one section of a player's statistics as text.
pub fn render_player(player: &Player, view: View) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{} ({})", player.name, player.tag)?;
    writeln!(out, "{}", "-".repeat(40))?;

    match view {
        View::Overview => render_overview(&mut out, player)?,
        View::Troops => {
            render_units(&mut out, "Heroes", &player.heroes)?;
            render_units(&mut out, "Troops", &player.troops)?;
            render_units(&mut out, "Spells", &player.spells)?;
        }
        View::Achievements => render_achievements(&mut out, &player.achievements)?,
    }
    Ok(out)
}

fn render_overview(out: &mut impl Write, player: &Player) -> fmt::Result {
    writeln!(out, "Town Hall:      {}", player.town_hall_level)?;
    writeln!(out, "XP Level:       {}", player.exp_level)?;
    writeln!(
        out,
        "Trophies:       {} (best {})",
        player.trophies, player.best_trophies
    )?;
    writeln!(out, "War Stars:      {}", player.war_stars)?;
    writeln!(
        out,
        "Attack/Defense: {} / {} wins",
        player.attack_wins, player.defense_wins
    )?;
    writeln!(
        out,
        "Donations:      {} given, {} received",
        player.donations, player.donations_received
    )?;

    match &player.clan {
        Some(clan) => {
            writeln!(
                out,
                "Clan:           {} ({}), level {}",
                clan.name, clan.tag, clan.clan_level
            )?;
            if let Some(role) = &player.role {
                writeln!(out, "Role:           {}", role)?;
            }
            if let Some(preference) = &player.war_preference {
                writeln!(out, "War Preference: {}", preference)?;
            }
        }
        None => writeln!(out, "Clan:           none")?,
    }

    if let Some(league) = &player.league {
        writeln!(out, "League:         {}", league.name)?;
    }
    Ok(())
}

fn render_units(out: &mut impl Write, title: &str, units: &[Unit]) -> fmt::Result {
    if units.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}:", title)?;
    for unit in units {
        let village = if unit.is_home() {
            String::new()
        } else {
            format!(" [{}]", unit.village)
        };
        let marker = if unit.is_maxed() { " ✓" } else { "" };
        writeln!(
            out,
            "  {:<24} {:>3}/{:<3}{}{}",
            unit.name, unit.level, unit.max_level, marker, village
        )?;
    }
    Ok(())
}

fn render_achievements(out: &mut impl Write, achievements: &[Achievement]) -> fmt::Result {
    if achievements.is_empty() {
        return writeln!(out, "No achievements");
    }
    for achievement in achievements {
        let stars = "★".repeat(achievement.stars as usize);
        let marker = if achievement.is_complete() { " ✓" } else { "" };
        writeln!(
            out,
            "  {:<32} {:<3} {}/{}{}",
            achievement.name, stars, achievement.value, achievement.target, marker
        )?;
        if !achievement.info.is_empty() {
            writeln!(out, "      {}", achievement.info)?;
        }
        if let Some(completion) = &achievement.completion_info {
            writeln!(out, "      {}", completion)?;
        }
    }
    Ok(())
}
