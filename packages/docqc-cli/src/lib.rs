use clap::builder::{
	StyledStr, Styles,
	styling::{AnsiColor, Effects, Style},
};

use docqc_config::{ENV_DATABASE_NAME, ENV_DATABASE_URL, ENV_PORT};

/// Package version suffixed with the git SHA and target triple recorded at build time.
pub const VERSION: &str = concat!(
	env!("CARGO_PKG_VERSION"),
	"-",
	env!("VERGEN_GIT_SHA"),
	"-",
	env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

const ENV_OVERRIDES: [(&str, &str); 3] = [
	(ENV_DATABASE_URL, "Postgres DSN; overrides storage.postgres.dsn."),
	(ENV_DATABASE_NAME, "Database name; overrides the DSN's database."),
	(ENV_PORT, "Listen port; replaces the port of service.http_bind."),
];

pub fn styles() -> Styles {
	Styles::styled()
		.header(header())
		.usage(header())
		.literal(literal())
		.placeholder(AnsiColor::Green.on_default())
}

/// `after_help` text listing the environment variables applied over the config file.
pub fn env_help() -> StyledStr {
	let (header, literal) = (header(), literal());
	let mut help = StyledStr::new();

	help.push_str(&format!("{header}Environment:{header:#}\n"));

	for (name, description) in ENV_OVERRIDES {
		help.push_str(&format!("  {literal}{name:<14}{literal:#} {description}\n"));
	}

	help
}

fn header() -> Style {
	AnsiColor::Yellow.on_default() | Effects::BOLD
}

fn literal() -> Style {
	AnsiColor::Cyan.on_default() | Effects::BOLD
}
