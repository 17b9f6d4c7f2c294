//! Locating the OCR models and equip icons at runtime.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

pub const ASSETS_ENV: &str = "DRAGONBORN_LEVELER_ASSETS_DIR";

const OCR_FILES: [&str; 3] = ["detection.mnn", "latin_recognition.mnn", "latin_charset.txt"];

#[derive(Debug, Clone)]
pub struct Assets {
	pub detection: PathBuf,
	pub recognition: PathBuf,
	pub charset: PathBuf,
	/// Directory holding [`ie::EquipIcons::FILES`].
	pub icons: PathBuf,
}

impl Assets {
	fn at(base: &Path) -> Self {
		let ocr = base.join("ocr");
		Self {
			detection: ocr.join(OCR_FILES[0]),
			recognition: ocr.join(OCR_FILES[1]),
			charset: ocr.join(OCR_FILES[2]),
			icons: base.join("icons"),
		}
	}

	fn complete(&self) -> bool {
		self.detection.is_file()
			&& self.recognition.is_file()
			&& self.charset.is_file()
			&& ie::EquipIcons::FILES.iter().all(|(_, file)| self.icons.join(file).is_file())
	}
}

fn candidates() -> Vec<PathBuf> {
	let mut candidates = Vec::new();
	if let Some(dir) = std::env::var_os(ASSETS_ENV) {
		candidates.push(PathBuf::from(dir));
	}
	if let Ok(exe) = std::env::current_exe()
		&& let Some(dir) = exe.parent()
	{
		candidates.push(dir.to_path_buf());
	}
	if let Ok(cwd) = std::env::current_dir() {
		candidates.push(cwd);
	}
	// Running from the repo with a different working directory.
	#[cfg(debug_assertions)]
	candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"));
	candidates
}

/// First directory holding both `ocr/` and `icons/` with every file present.
pub fn resolve() -> Result<Assets> {
	resolve_in(candidates())
}

pub fn resolve_in(candidates: impl IntoIterator<Item = PathBuf>) -> Result<Assets> {
	let mut tried = Vec::new();
	for base in candidates {
		let assets = Assets::at(&base);
		if assets.complete() {
			tracing::debug!(dir = %base.display(), "assets found");
			return Ok(assets);
		}
		tried.push(base);
	}

	let icons: Vec<_> = ie::EquipIcons::FILES.iter().map(|(_, file)| format!("  - icons/{file}")).collect();
	bail!(
		"asset files not found. Expected:\n{}\n{}\n\nSearched in:\n{}\n\nFix: copy the 'ocr/' and 'icons/' folders next to the executable (or set {ASSETS_ENV} to the folder that contains them).",
		OCR_FILES.map(|f| format!("  - ocr/{f}")).join("\n"),
		icons.join("\n"),
		tried
			.into_iter()
			.map(|p| format!("  - {}", p.display()))
			.collect::<Vec<_>>()
			.join("\n")
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn scratch(name: &str) -> PathBuf {
		let dir = std::env::temp_dir().join(format!("leveler-assets-{name}-{}", std::process::id()));
		let _ = fs::remove_dir_all(&dir);
		fs::create_dir_all(dir.join("ocr")).unwrap();
		fs::create_dir_all(dir.join("icons")).unwrap();
		dir
	}

	fn fill(dir: &Path) {
		for file in OCR_FILES {
			fs::write(dir.join("ocr").join(file), b"x").unwrap();
		}
		for (_, file) in ie::EquipIcons::FILES {
			fs::write(dir.join("icons").join(file), b"x").unwrap();
		}
	}

	#[test]
	fn picks_the_first_complete_directory() {
		let partial = scratch("partial");
		let full = scratch("full");
		fill(&full);
		// OCR models without icons do not count.
		for file in OCR_FILES {
			fs::write(partial.join("ocr").join(file), b"x").unwrap();
		}

		let assets = resolve_in([partial.clone(), full.clone()]).unwrap();
		assert_eq!(assets.detection, full.join("ocr").join("detection.mnn"));
		assert_eq!(assets.icons, full.join("icons"));

		let _ = fs::remove_dir_all(partial);
		let _ = fs::remove_dir_all(full);
	}

	#[test]
	fn missing_files_list_the_searched_paths() {
		let empty = scratch("empty");
		let err = resolve_in([empty.clone()]).unwrap_err().to_string();
		assert!(err.contains("latin_charset.txt"));
		assert!(err.contains(&empty.display().to_string()));
		let _ = fs::remove_dir_all(empty);
	}
}
