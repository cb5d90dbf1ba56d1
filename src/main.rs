use clap::{command, Arg, ArgAction, ArgMatches, Command};
use color_eyre::eyre::{eyre, Result};
use log::LevelFilter;
use std::path::PathBuf;

use site_theme::logger::setup_logger;
use site_theme::theme::{load_catalog, load_colors};
use site_theme::{
    ColorOptions, DetachedStorage, Element, FileStorage, PreferenceStore, SiteConfig, Storage,
    ThemeMode,
};

type Store = PreferenceStore<Box<dyn Storage>, Element>;

fn cli() -> Command {
    command!()
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to the site config file"),
        )
        .arg(
            Arg::new("storage")
                .long("storage")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to the preference storage file"),
        )
        .arg(
            Arg::new("no-storage")
                .long("no-storage")
                .action(ArgAction::SetTrue)
                .conflicts_with("storage")
                .help("Run as if no persistent storage were available"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log debug output"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("show").about("Show the active preference and derived assets"))
        .subcommand(Command::new("themes").about("List the theme catalog"))
        .subcommand(
            Command::new("colors")
                .about("List the colors a theme resolves to")
                .arg(Arg::new("theme").help("Theme name, defaults to the active theme")),
        )
        .subcommand(
            Command::new("set-color")
                .about("Switch theme")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("keep-mode")
                        .long("keep-mode")
                        .action(ArgAction::SetTrue)
                        .help("Keep the current mode instead of the theme's default"),
                ),
        )
        .subcommand(
            Command::new("set-mode")
                .about("Switch between light and dark")
                .arg(Arg::new("mode").required(true).value_parser(["light", "dark"])),
        )
        .subcommand(Command::new("toggle-mode").about("Flip light and dark"))
        .subcommand(
            Command::new("set-lang")
                .about("Set the language tag")
                .arg(Arg::new("tag").required(true)),
        )
        .subcommand(Command::new("reset").about("Forget stored preferences"))
        .subcommand(
            Command::new("custom")
                .about("Manage per-theme color overrides")
                .subcommand_required(true)
                .subcommand(Command::new("get").arg(Arg::new("theme").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("theme").required(true))
                        .arg(Arg::new("ids").required(true).num_args(1..)),
                )
                .subcommand(Command::new("clear").arg(Arg::new("theme").required(true))),
        )
        .subcommand(
            Command::new("config").about("Print the effective configuration").arg(
                Arg::new("dev")
                    .long("dev")
                    .action(ArgAction::SetTrue)
                    .help("Resolve the base path for development"),
            ),
        )
}

fn open_store(matches: &ArgMatches, config: &SiteConfig) -> Store {
    let storage: Box<dyn Storage> = if matches.get_flag("no-storage") {
        Box::new(DetachedStorage)
    } else {
        match matches
            .get_one::<PathBuf>("storage")
            .cloned()
            .or_else(|| config.storage_path())
        {
            Some(path) => {
                let storage = FileStorage::open(path);
                log::debug!("Preferences file: {}", storage.path().display());
                Box::new(storage)
            }
            None => {
                log::warn!("No data directory found, preferences will not persist");
                Box::new(DetachedStorage)
            }
        }
    };
    let catalog = load_catalog(config.catalog_path.as_deref());
    let colors = load_colors(config.colors_path.as_deref());
    let mut store = PreferenceStore::new(
        catalog,
        colors,
        storage,
        Element::new(),
        config.store_settings(),
    );
    store.initialize();
    store
}

fn print_root(store: &Store) {
    for (name, value) in store.root().attributes() {
        println!("{name}=\"{value}\"");
    }
    for (name, value) in store.root().style() {
        println!("{name}: {value};");
    }
}

fn print_colors(store: &Store, theme: &str) {
    for color in store.effective_colors(theme) {
        println!("{:<12} {}", color.id, color.value);
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    setup_logger(level);

    let config = SiteConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    if let Some(("config", sub)) = matches.subcommand() {
        print!("{}", serde_yaml::to_string(&config)?);
        println!("# base path: {}", config.base_path(sub.get_flag("dev")));
        return Ok(());
    }

    let mut store = open_store(&matches, &config);

    match matches.subcommand() {
        Some(("show", _)) => {
            let preference = store.preference();
            let known = if store.active_theme().is_some() { "" } else { " (not in catalog)" };
            println!("theme:       {}{known}", preference.theme_name);
            println!("mode:        {}", preference.mode);
            println!("lang:        {}", preference.lang);
            println!("namespace:   {}", store.namespace());
            let logo = store.footer_logo();
            println!("footer logo: bb={} ub={}", logo.bb, logo.ub);
            println!("qr code:     {}", store.qr_code_image());
            println!("nav type:    {}", store.nav_type());
            print_root(&store);
        }
        Some(("themes", _)) => {
            for option in store.theme_options() {
                let marker = if option.value == store.theme_color() { "*" } else { " " };
                println!("{marker} {}", option.label);
            }
        }
        Some(("colors", sub)) => {
            let theme = sub
                .get_one::<String>("theme")
                .cloned()
                .unwrap_or_else(|| store.theme_color().to_string());
            print_colors(&store, &theme);
        }
        Some(("set-color", sub)) => {
            let name = sub
                .get_one::<String>("name")
                .ok_or_else(|| eyre!("missing theme name"))?;
            let options = ColorOptions {
                keep_mode: sub.get_flag("keep-mode"),
            };
            store.set_theme_color(name, options)?;
            print_root(&store);
        }
        Some(("set-mode", sub)) => {
            let mode: ThemeMode = sub
                .get_one::<String>("mode")
                .ok_or_else(|| eyre!("missing mode"))?
                .parse()?;
            store.set_theme_mode(mode);
            print_root(&store);
        }
        Some(("toggle-mode", _)) => {
            store.toggle_theme_mode();
            print_root(&store);
        }
        Some(("set-lang", sub)) => {
            let tag = sub
                .get_one::<String>("tag")
                .ok_or_else(|| eyre!("missing language tag"))?;
            store.set_lang(tag)?;
            println!("lang: {}", store.lang());
        }
        Some(("reset", _)) => {
            let preference = store.reset_to_default().clone();
            println!(
                "reset to theme={} mode={} lang={}",
                preference.theme_name, preference.mode, preference.lang
            );
            print_root(&store);
        }
        Some(("custom", sub)) => match sub.subcommand() {
            Some(("get", args)) => {
                let theme = theme_arg(args)?;
                for id in store.custom_colors(&theme) {
                    println!("{id}");
                }
            }
            Some(("set", args)) => {
                let theme = theme_arg(args)?;
                let ids: Vec<String> = args
                    .get_many::<String>("ids")
                    .map(|ids| ids.cloned().collect())
                    .unwrap_or_default();
                store.set_custom_colors(&theme, &ids[..]);
                print_colors(&store, &theme);
            }
            Some(("clear", args)) => {
                let theme = theme_arg(args)?;
                store.clear_custom_colors(&theme);
                print_colors(&store, &theme);
            }
            _ => return Err(eyre!("unknown custom subcommand")),
        },
        _ => return Err(eyre!("unknown subcommand")),
    }

    Ok(())
}

fn theme_arg(args: &ArgMatches) -> Result<String> {
    args.get_one::<String>("theme")
        .cloned()
        .ok_or_else(|| eyre!("missing theme name"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_set_color_args() {
        let matches = cli()
            .try_get_matches_from(["site-theme", "--no-storage", "set-color", "2501222", "--keep-mode"])
            .unwrap();
        assert!(matches.get_flag("no-storage"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "set-color");
        assert_eq!(sub.get_one::<String>("name").map(String::as_str), Some("2501222"));
        assert!(sub.get_flag("keep-mode"));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(cli()
            .try_get_matches_from(["site-theme", "set-mode", "sepia"])
            .is_err());
    }

    #[test]
    fn test_storage_flags_conflict() {
        assert!(cli()
            .try_get_matches_from(["site-theme", "--storage", "x.json", "--no-storage", "show"])
            .is_err());
    }
}
