use super::*;

/// The directory exports are written to, remembered across runs in a plain
/// text file.
#[derive(Debug)]
pub(crate) struct SaveDirectory {
  config_path: PathBuf,
  directory: PathBuf,
}

impl SaveDirectory {
  const CONFIG_FILE: &str = "default_dir.txt";
  const CONFIG_FILE_VAR: &str = "REDDIT_COMMENTS_DIR_FILE";

  #[cfg(test)]
  pub(crate) fn at(config_path: PathBuf, directory: PathBuf) -> Self {
    Self {
      config_path,
      directory,
    }
  }

  fn config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(Self::CONFIG_FILE_VAR) {
      return Ok(PathBuf::from(path));
    }

    Ok(env::current_dir()?.join(Self::CONFIG_FILE))
  }

  pub(crate) fn directory(&self) -> &Path {
    &self.directory
  }

  /// The directory holding the running executable.
  fn install_directory() -> Result<PathBuf> {
    let executable = env::current_exe()?;

    match executable.parent() {
      Some(parent) => Ok(parent.to_path_buf()),
      None => Ok(env::current_dir()?),
    }
  }

  pub(crate) fn load() -> Result<Self> {
    let config_path = Self::config_path()?;

    let saved = if config_path.exists() {
      let contents = fs::read_to_string(&config_path).with_context(|| {
        format!("could not read {}", config_path.display())
      })?;

      Some(contents.trim().to_string()).filter(|saved| !saved.is_empty())
    } else {
      None
    };

    let directory = match saved {
      Some(saved) => PathBuf::from(saved),
      None => Self::install_directory()?,
    };

    debug!(
      config = %config_path.display(),
      directory = %directory.display(),
      "loaded save location"
    );

    Ok(Self {
      config_path,
      directory,
    })
  }

  fn persist(&self) -> Result {
    fs::write(&self.config_path, self.directory.to_string_lossy().as_bytes())
      .with_context(|| {
        format!("could not write {}", self.config_path.display())
      })?;

    Ok(())
  }

  pub(crate) fn set(&mut self, directory: PathBuf) -> Result {
    self.directory = directory;
    self.persist()
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::sync::atomic::{AtomicUsize, Ordering},
  };

  static COUNTER: AtomicUsize = AtomicUsize::new(0);

  fn temp_config_file() -> PathBuf {
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

    env::temp_dir().join(format!(
      "reddit_comments_dir_test_{}_{unique}.txt",
      process::id()
    ))
  }

  fn with_temp_env<F>(f: F)
  where
    F: FnOnce(&Path),
  {
    let path = temp_config_file();

    // SAFETY: Scoped test code sets env var to isolate the config file.
    unsafe {
      env::set_var(SaveDirectory::CONFIG_FILE_VAR, &path);
    }

    f(&path);

    // SAFETY: Test restores original environment variable state before exit.
    unsafe {
      env::remove_var(SaveDirectory::CONFIG_FILE_VAR);
    }

    let _ = fs::remove_file(&path);
  }

  #[test]
  fn load_falls_back_to_install_directory_and_set_persists() {
    with_temp_env(|path| {
      let mut save_directory = SaveDirectory::load().unwrap();

      assert_eq!(
        save_directory.directory(),
        SaveDirectory::install_directory().unwrap()
      );

      assert!(!path.exists());

      save_directory.set(PathBuf::from("/tmp/exports")).unwrap();

      assert_eq!(fs::read_to_string(path).unwrap(), "/tmp/exports");

      let reloaded = SaveDirectory::load().unwrap();

      assert_eq!(reloaded.directory(), Path::new("/tmp/exports"));

      fs::write(path, "  \n").unwrap();

      let blank = SaveDirectory::load().unwrap();

      assert_eq!(
        blank.directory(),
        SaveDirectory::install_directory().unwrap()
      );

      fs::write(path, "/srv/data\n").unwrap();

      assert_eq!(
        SaveDirectory::load().unwrap().directory(),
        Path::new("/srv/data")
      );
    });
  }
}
