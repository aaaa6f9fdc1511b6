#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use initd_forge::{
    DaemonProperties, DaemonPropertiesBuilder, ForgeConfig, InitScriptForge, OsFamily, OsIdentity,
};
use tempfile::TempDir;

pub const SKELETON: &str = include_str!("../fixtures/debian-skeleton");

/// A throwaway filesystem holding a daemon binary, a skeleton and an init.d dir.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("opt/mydaemon")).unwrap();
        fs::create_dir_all(dir.path().join("etc/init.d")).unwrap();
        fs::write(dir.path().join("etc/init.d/skeleton"), SKELETON).unwrap();

        let fixture = Fixture { dir };
        fixture.install_binary("mydaemon", 0o755);
        fixture
    }

    pub fn path(&self) -> &Path { self.dir.path() }
    pub fn app_dir(&self) -> PathBuf { self.path().join("opt/mydaemon") }
    pub fn init_dir(&self) -> PathBuf { self.path().join("etc/init.d") }
    pub fn skeleton(&self) -> PathBuf { self.init_dir().join("skeleton") }

    pub fn install_binary(&self, name: &str, mode: u32) -> PathBuf {
        let path = self.app_dir().join(name);
        fs::write(&path, "#!/bin/sh\nexec sleep 1000\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    pub fn config(&self) -> ForgeConfig {
        ForgeConfig::new().skeleton(self.skeleton()).init_dir(self.init_dir())
    }

    pub fn forge(&self, distribution: &str) -> InitScriptForge {
        let identity = OsIdentity::new(OsFamily::Linux, distribution, "12.5");
        InitScriptForge::new(identity).config(self.config())
    }

    pub fn props(&self) -> DaemonPropertiesBuilder {
        DaemonProperties::builder()
            .app_name("mydaemon")
            .app_description("Watches the mailbox and files invoices")
            .author_name("Jane Doe")
            .author_email("jane@x.com")
            .app_dir(self.app_dir())
            .app_executable("mydaemon")
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn mode_of(path: &Path) -> u32 {
    fs::metadata(path).unwrap().permissions().mode() & 0o777
}
