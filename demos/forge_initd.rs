use initd_forge::{
    EnvPropertySource, FailureKind, ForgeConfig, InitScriptForge, PropertySource, identify,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let overwrite = std::env::args().any(|a| a == "--overwrite");
    let dry_run = std::env::args().any(|a| a == "--dry-run");

    println!("--- Launcher initd_forge ---");
    println!("Host: {}", identify());

    let Some(props) = EnvPropertySource.daemon_properties() else {
        eprintln!("Set DAEMON_APP_NAME, DAEMON_APP_DIR and DAEMON_APP_EXECUTABLE first.");
        std::process::exit(2);
    };

    let forge = InitScriptForge::detect(ForgeConfig::from_env());

    let result = if dry_run {
        forge.forge(Some(&props)).map(|body| {
            print!("{}", body);
            None
        })
    } else {
        forge.write(Some(&props), overwrite).map(Some)
    };

    match result {
        Ok(Some(path)) => println!("Init script installed at {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            match e.kind() {
                FailureKind::UnsupportedPlatform => {
                    eprintln!("\nERROR: {} has no init.d skeleton support.", forge.identity())
                }
                FailureKind::DestinationExists => {
                    eprintln!("\nERROR: {} (pass --overwrite to replace it)", e)
                }
                _ => eprintln!("\nERROR: {}", e),
            }
            std::process::exit(1);
        }
    }
}
