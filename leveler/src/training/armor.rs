//! Take hits, heal when low, bail out before dying.

use std::time::Duration;

use crate::action::secs;
use crate::config::{ArmorSettings, Config};
use crate::session::Session;
use crate::{Error, Result, equip};

use super::Completion;

/// The bar reads empty when the HUD fades out at full health.
pub fn reported_health(raw: f32) -> f32 {
	if raw == 0.0 { 100.0 } else { raw }
}

fn sample(session: &Session) -> Result<f32> {
	let health = reported_health(session.eyes().health()?);
	tracing::debug!(health, "health");
	Ok(health)
}

/// A reading taken after a heal must stay above the abort floor.
fn check_floor(health: f32, settings: &ArmorSettings) -> Result<()> {
	if health < settings.abort_floor {
		tracing::error!(health, floor = settings.abort_floor, "health critically low");
		return Err(Error::CriticalThreshold {
			health,
			floor: settings.abort_floor,
		});
	}
	Ok(())
}

pub fn run(session: &Session, config: &Config) -> Result<Completion> {
	let settings = &config.armor;
	let spell = settings.healing_spell;
	tracing::info!(minutes = settings.minutes, spell = spell.favorite_name(), hand = %settings.hand, "armor training");

	session.focus()?;
	equip::equip_favorite(session, spell.favorite_name(), settings.hand)?;

	let hold = secs(spell.cast_seconds());
	let duration = Duration::from_secs(u64::from(settings.minutes) * 60);
	let start = session.clock().elapsed();

	loop {
		if session.is_cancelled() {
			return Ok(Completion::Stopped);
		}
		if session.clock().elapsed().saturating_sub(start) >= duration {
			tracing::info!(minutes = settings.minutes, "training time reached");
			return Ok(Completion::Finished);
		}

		let mut health = sample(session)?;
		if health < settings.start_healing {
			tracing::info!(health, "healing");
			while health < settings.stop_healing {
				if session.is_cancelled() {
					return Ok(Completion::Stopped);
				}
				session.actions().cast(settings.hand, hold)?;
				health = sample(session)?;
				tracing::info!(health, "health after heal");
				check_floor(health, settings)?;
			}
		}

		session.pause(secs(0.5));
	}
}
