// SPDX-License-Identifier: MPL-2.0
use replay_repeat::app::{self, Flags};
use replay_repeat::logging;
use std::path::PathBuf;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let verbose = args.contains("--verbose");
    logging::init(verbose);

    let lang: Option<String> = match args.opt_value_from_str("--lang") {
        Ok(lang) => lang,
        Err(err) => {
            tracing::warn!(%err, "ignoring invalid --lang argument");
            None
        }
    };
    let config_dir: Option<PathBuf> = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            tracing::warn!(%err, "ignoring invalid --config-dir argument");
            None
        }
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }

    app::run(Flags { lang, config_dir })
}
