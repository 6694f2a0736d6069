// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "landing-fx")]
#[command(about = "Animated landing page with a wireframe background", long_about = None)]
pub struct Cli {
    /// Draw only the background, without the page overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON file overriding effect parameters
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Skip the GPU and use the 2D fallback background
    #[arg(long = "force-fallback", default_value = "false")]
    pub force_fallback: bool,

    /// Minimise motion: no parallax, tilt, magnetic pull or scripted animations
    #[arg(long = "reduced-motion", default_value = "false")]
    pub reduced_motion: bool,

    /// Run the page and background without a window
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 300)]
    pub frames: u64,

    /// Seed for particle and marker randomness
    #[arg(long, default_value_t = 7)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["landing-fx"]);
        assert!(!cli.no_ui && !cli.headless && !cli.force_fallback);
        assert_eq!(cli.frames, 300);
        assert!(cli.config.is_none());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "landing-fx",
            "--headless",
            "--frames",
            "10",
            "--reduced-motion",
            "-c",
            "fx.json",
        ]);
        assert!(cli.headless && cli.reduced_motion);
        assert_eq!(cli.frames, 10);
        assert_eq!(cli.config, Some(PathBuf::from("fx.json")));
    }
}
