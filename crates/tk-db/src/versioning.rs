//! Publish path synthesis.
//!
//! Pure functions from the codes of a publish's ancestry to its canonical
//! location. No I/O: the store records paths, it never touches the files.
//!
//! ```text
//! work:    {root}/assets/{at}/{asset}/{tt}/{code}/work/{file}
//! release: {root}/assets/{at}/{asset}/{tt}/{code}/release/r001/{file}
//! file:    {at}_{asset}_{code}_{file_type}_{r}{version:03}{extension}
//! ```

use tk_core::enums::Release;

/// Everything that determines a publish path except the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishPath<'a> {
    pub root: &'a str,
    pub asset_type: &'a str,
    pub asset: &'a str,
    pub task_type: &'a str,
    pub publish_code: &'a str,
    pub file_type: &'a str,
    pub extension: &'a str,
    pub release: Release,
}

impl PublishPath<'_> {
    /// File name for `version`, e.g. `chr_hero_knight_cache_abc_w001.abc`.
    #[must_use]
    pub fn file_name(&self, version: i64) -> String {
        format!(
            "{}_{}_{}_{}_{}{}",
            self.asset_type,
            self.asset,
            self.publish_code,
            self.file_type,
            self.release.version_label(version),
            self.extension
        )
    }

    /// Full path for `version`.
    #[must_use]
    pub fn path(&self, version: i64) -> String {
        let dir = [
            self.root.trim_end_matches('/'),
            "assets",
            self.asset_type,
            self.asset,
            self.task_type,
            self.publish_code,
            self.release.as_str(),
        ]
        .join("/");
        let file = self.file_name(version);

        match self.release {
            Release::Work => format!("{dir}/{file}"),
            Release::Release => format!("{dir}/{}/{file}", self.release.version_label(version)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hero_rig(release: Release) -> PublishPath<'static> {
        PublishPath {
            root: "/prod/PRJ1",
            asset_type: "chr",
            asset: "hero_knight",
            task_type: "rig",
            publish_code: "cache",
            file_type: "abc",
            extension: ".abc",
            release,
        }
    }

    #[test]
    fn work_path_has_no_version_folder() {
        assert_eq!(
            hero_rig(Release::Work).path(1),
            "/prod/PRJ1/assets/chr/hero_knight/rig/cache/work/chr_hero_knight_cache_abc_w001.abc"
        );
    }

    #[test]
    fn release_path_has_version_folder() {
        assert_eq!(
            hero_rig(Release::Release).path(1),
            "/prod/PRJ1/assets/chr/hero_knight/rig/cache/release/r001/chr_hero_knight_cache_abc_r001.abc"
        );
    }

    #[test]
    fn trailing_slash_on_root_is_trimmed() {
        let mut path = hero_rig(Release::Work);
        path.root = "/prod/PRJ1/";
        assert_eq!(path.path(2), hero_rig(Release::Work).path(2));
    }

    #[test]
    fn paths_are_deterministic_and_version_sensitive() {
        let p = hero_rig(Release::Work);
        assert_eq!(p.path(7), p.path(7));
        assert_ne!(p.path(1), p.path(2));
        assert!(p.path(12).ends_with("_w012.abc"));
    }
}
