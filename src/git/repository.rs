use crate::error::{ReleaseVersionError, Result};
use crate::git::TagSource;
use git2::{Cred, CredentialType, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Refspec mirroring every remote tag onto the local tag namespace
const TAG_REFSPEC: &str = "+refs/tags/*:refs/tags/*";

/// Namespace holding fetched tags until they replace the local ones
const STAGING_PREFIX: &str = "refs/release-version/tags/";

/// Tags of a git repository, read through `git2`
pub struct Git2TagSource {
    repo: Mutex<Git2Repo>,
}

impl Git2TagSource {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2TagSource::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2TagSource {
            repo: Mutex::new(repo),
        }
    }

    /// Working directory of the repository, `None` for bare repositories
    pub fn workdir(&self) -> Result<Option<PathBuf>> {
        Ok(self.lock()?.workdir().map(Path::to_path_buf))
    }

    /// Fetch all tags from `remote_name`.
    ///
    /// With `replace_local` the repository afterwards holds exactly the
    /// remote's tags. The remote tags are staged outside `refs/tags/` and
    /// local tags are only removed once the fetch succeeded, so a failed
    /// fetch never loses tag history.
    ///
    /// Supports SSH authentication via keys in `~/.ssh/` or the SSH agent.
    pub fn fetch_tags(&self, remote_name: &str, replace_local: bool) -> Result<()> {
        let repo = self.lock()?;

        let mut remote = repo.find_remote(remote_name).map_err(|e| {
            ReleaseVersionError::remote(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(ssh_credentials);

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        let refspec = if replace_local {
            // Leftovers of an interrupted run must not leak into the new tag set
            for (staged, _, _) in staged_tags(&repo)? {
                repo.find_reference(&staged)?.delete()?;
            }
            fetch_options.download_tags(git2::AutotagOption::None);
            format!("+refs/tags/*:{}*", STAGING_PREFIX)
        } else {
            TAG_REFSPEC.to_string()
        };

        remote
            .fetch(&[refspec.as_str()], Some(&mut fetch_options), None)
            .map_err(|e| {
                ReleaseVersionError::remote(format!(
                    "Failed to fetch tags from '{}': {}",
                    remote_name, e
                ))
            })?;

        if replace_local {
            replace_with_staged(&repo)?;
        }

        tracing::info!(remote = remote_name, replace_local, "fetched tags from remote");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| git2::Error::from_str("repository lock poisoned").into())
    }
}

impl TagSource for Git2TagSource {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.lock()?.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }
}

/// Staged refs as `(staged ref name, tag name, target)`
fn staged_tags(repo: &Git2Repo) -> Result<Vec<(String, String, git2::Oid)>> {
    let mut staged = Vec::new();
    for reference in repo.references_glob(&format!("{}*", STAGING_PREFIX))? {
        let reference = reference?;
        let (Some(name), Some(target)) = (reference.name(), reference.target()) else {
            continue;
        };
        if let Some(tag) = name.strip_prefix(STAGING_PREFIX) {
            staged.push((name.to_string(), tag.to_string(), target));
        }
    }
    Ok(staged)
}

/// Swap the local tags for the staged ones
fn replace_with_staged(repo: &Git2Repo) -> Result<()> {
    let staged = staged_tags(repo)?;

    let local = repo.tag_names(None)?;
    for name in local.iter().flatten() {
        repo.tag_delete(name)?;
    }

    for (staged_name, tag, target) in &staged {
        repo.reference(
            &format!("refs/tags/{}", tag),
            *target,
            true,
            "release-version: replace tags",
        )?;
        repo.find_reference(staged_name)?.delete()?;
    }

    tracing::debug!(
        deleted = local.len(),
        fetched = staged.len(),
        "replaced local tags with remote tags"
    );
    Ok(())
}

fn ssh_credentials(
    _url: &str,
    username_from_url: Option<&str>,
    allowed_types: CredentialType,
) -> std::result::Result<Cred, git2::Error> {
    let username = username_from_url.unwrap_or("git");

    if allowed_types.contains(CredentialType::SSH_KEY) {
        if let Some(home) = dirs::home_dir() {
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let path = home.join(".ssh").join(key);
                if path.exists() {
                    if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                        return Ok(cred);
                    }
                }
            }
        }

        if let Ok(cred) = Cred::ssh_key_from_agent(username) {
            return Ok(cred);
        }
    }

    Cred::default()
}
