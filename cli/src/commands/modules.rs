use anyhow::Context;

use crate::mprint;
use crate::terminal::print;
use netzap_common::config::Config;
use netzap_core::ZMap;

pub async fn probe_modules(zmap: &ZMap, cfg: &Config) -> anyhow::Result<()> {
    let modules = zmap.list_probe_modules().await?;
    print_list("probe modules", &modules, cfg);
    Ok(())
}

pub async fn output_modules(zmap: &ZMap, cfg: &Config) -> anyhow::Result<()> {
    let modules = zmap.list_output_modules().await?;
    print_list("output modules", &modules, cfg);
    Ok(())
}

pub async fn output_fields(zmap: &ZMap, cfg: &Config) -> anyhow::Result<()> {
    let fields = zmap.list_output_fields().await?;
    print_list("output fields", &fields, cfg);
    Ok(())
}

pub async fn version(zmap: &ZMap, cfg: &Config) -> anyhow::Result<()> {
    let version = zmap.version().await.context("could not query zmap")?;
    if cfg.quiet > 1 {
        mprint!(&version);
        return Ok(());
    }
    print::header("zmap", cfg.quiet);
    print::set_key_width(["Executable", "Version"]);
    print::aligned_line("Executable", zmap.executable_path());
    print::aligned_line("Version", version);
    Ok(())
}

fn print_list(title: &str, items: &[String], cfg: &Config) {
    print::header(title, cfg.quiet);
    for item in items {
        match cfg.quiet {
            2 => {
                mprint!(item);
            }
            _ => print::print_status(item),
        }
    }
}
