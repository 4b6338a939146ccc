use std::path::Path;

/// A path-translation strategy applied during normalization. `None` means the
/// rule does not apply to this path and the next registered strategy is tried.
pub(crate) trait PathTranslator {
    fn translate(&self, path: &str) -> Option<String>;
}

/// Rewrites a Windows-side view of a WSL mount back to the native Linux path:
/// everything through the distro segment is stripped and replaced with a
/// single leading `/`. If the mount marker is present but the distro marker
/// is not, the strategy declines and the path is left as-is.
#[derive(Debug)]
pub(crate) struct WslMountTranslator {
    mount_marker: String,
    distro_marker: String,
}

impl WslMountTranslator {
    pub(crate) fn new(mount_marker: &str, distro_marker: &str) -> Self {
        Self {
            mount_marker: mount_marker.to_string(),
            distro_marker: distro_marker.to_string(),
        }
    }

    pub(crate) fn default_mount() -> Self {
        Self::new("wsl.localhost/", "Ubuntu_Final/")
    }
}

impl PathTranslator for WslMountTranslator {
    fn translate(&self, path: &str) -> Option<String> {
        if !path.contains(self.mount_marker.as_str()) {
            return None;
        }
        let index = path.find(self.distro_marker.as_str())?;
        Some(format!("/{}", &path[index + self.distro_marker.len()..]))
    }
}

pub(crate) fn default_translators() -> Vec<Box<dyn PathTranslator>> {
    vec![Box::new(WslMountTranslator::default_mount())]
}

/// Normalizes a candidate script path: backslashes become forward slashes,
/// the first matching translation strategy is applied, then doubled
/// separators are collapsed in one non-repeating pass. Three or more
/// consecutive separators are left partially collapsed on purpose.
pub(crate) fn normalize_path(raw: &str, translators: &[Box<dyn PathTranslator>]) -> String {
    let mut path = raw.replace('\\', "/");
    for translator in translators {
        if let Some(translated) = translator.translate(&path) {
            path = translated;
            break;
        }
    }
    path.replace("//", "/")
}

/// Joins `base_dir/scripts/{command}.sh` and normalizes the result. The
/// command name is used verbatim; existence is the caller's concern.
pub(crate) fn resolve_script_path(
    base_dir: &Path,
    command: &str,
    translators: &[Box<dyn PathTranslator>],
) -> String {
    let candidate = base_dir.join("scripts").join(format!("{}.sh", command));
    normalize_path(&candidate.to_string_lossy(), translators)
}
