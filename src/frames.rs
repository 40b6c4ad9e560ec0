//! Shared frame validation
//!
//! Frame composed pages need every frame file to exist in the default
//! language directory. The check is memoized per engine: once it succeeds it
//! is never repeated, while a failed check is retried on the next call so an
//! operator can fix a deployment without restarting.

use crate::PathResolver;
use parking_lot::Mutex;

/// Frames every composed page is built with
pub const DEFAULT_FRAMES: [&str; 5] = [
	"_main",
	"_header_content",
	"_header_claim",
	"_footer_content",
	"_footer_claim",
];

/// Default frame set as owned names
pub fn default_frames() -> Vec<String> {
	DEFAULT_FRAMES.iter().map(|frame| frame.to_string()).collect()
}

/// Outcome of the last frame check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
	/// Never checked
	Unknown,
	/// All frames present; terminal
	Valid,
	/// Last check found missing frames; checked again on next use
	Invalid,
}

/// Memoized frame existence check
#[derive(Debug)]
pub struct FrameValidator {
	status: Mutex<FrameStatus>,
}

impl FrameValidator {
	/// Create a validator that has not checked anything yet
	pub fn new() -> Self {
		Self {
			status: Mutex::new(FrameStatus::Unknown),
		}
	}

	/// Current memo state
	pub fn status(&self) -> FrameStatus {
		*self.status.lock()
	}

	/// Ensure every frame resolves for the default language
	///
	/// Each missing frame is logged with the path it was expected at.
	///
	/// # Examples
	///
	/// ```
	/// use locale_templates::{FrameStatus, FrameValidator, PathResolver};
	///
	/// let dir = tempfile::tempdir().unwrap();
	/// let resolver = PathResolver::new(dir.path());
	/// let frames = vec!["_main".to_string()];
	/// let validator = FrameValidator::new();
	///
	/// assert!(!validator.ensure_frames_exist(&resolver, &frames));
	/// assert_eq!(validator.status(), FrameStatus::Invalid);
	///
	/// std::fs::create_dir_all(dir.path().join("default")).unwrap();
	/// std::fs::write(dir.path().join("default/_main.tmpl"), "F").unwrap();
	/// assert!(validator.ensure_frames_exist(&resolver, &frames));
	/// assert_eq!(validator.status(), FrameStatus::Valid);
	/// ```
	pub fn ensure_frames_exist(&self, resolver: &PathResolver, frames: &[String]) -> bool {
		let mut status = self.status.lock();
		if *status == FrameStatus::Valid {
			return true;
		}

		let mut missing = 0usize;
		for frame in frames {
			match resolver.resolve(frame, "") {
				Ok(Some(_)) => {}
				Ok(None) => {
					missing += 1;
					let path = resolver.default_path(frame);
					tracing::error!(
						frame = %frame,
						"frame file {} does not exist",
						path.display()
					);
				}
				Err(e) => {
					missing += 1;
					tracing::error!(frame = %frame, error = %e, "frame name is not usable");
				}
			}
		}

		*status = if missing == 0 {
			FrameStatus::Valid
		} else {
			FrameStatus::Invalid
		};
		missing == 0
	}
}

impl Default for FrameValidator {
	fn default() -> Self {
		Self::new()
	}
}
