use std::env;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, info};

use tty_menu::config::{MenuConfig, default_config_path, load_config};
use tty_menu::{Menu, MenuError, Notice, Selection};

fn main() -> Result<ExitCode, MenuError> {
    // 日志写到 stderr，避免破坏 stdout 上的菜单
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tty_menu=warn")),
        )
        .init();

    let labels: Vec<String> = env::args().skip(1).collect();
    if labels.is_empty() {
        eprintln!("用法: tty-menu <选项>...");
        return Ok(ExitCode::from(2));
    }

    // 配置文件 (~/.config/tty-menu/config.toml)
    let config = match default_config_path() {
        Some(path) => load_config(&path)?,
        None => MenuConfig::default(),
    };
    debug!(?config, "配置已加载");

    let mut menu = Menu::new(config);
    for label in &labels {
        menu.add(label.as_str())?;
    }

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))?;

    // 主循环
    let result = run_menu(&mut menu, &mut stdout);

    // 恢复终端
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    match result? {
        Some(selection) => {
            info!(index = selection.index, "已选择");
            println!("{}", selection.label);
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::from(1)),
    }
}

fn run_menu(menu: &mut Menu, stdout: &mut io::Stdout) -> Result<Option<Selection>, MenuError> {
    let mut stdin = io::stdin().lock();
    let mut buf = [0u8; 64];

    menu.tick()?;
    loop {
        stdout.write_all(&menu.take_output())?;
        stdout.flush()?;

        let n = stdin.read(&mut buf)?;
        if n == 0 {
            menu.end_input()?;
            return Ok(None);
        }

        for notice in menu.feed(&buf[..n])? {
            match notice {
                Notice::Selected(selection) => {
                    stdout.write_all(&menu.take_output())?;
                    menu.close()?;
                    stdout.write_all(&menu.take_output())?;
                    return Ok(Some(selection));
                }
                Notice::Closed => {
                    stdout.write_all(&menu.take_output())?;
                    return Ok(None);
                }
            }
        }
    }
}
