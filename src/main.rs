use async_trait::async_trait;
use bot_utils::{rolls::reseed_periodically, Plugin, PluginConfig, Responder};
use std::sync::Arc;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout},
    sync::Mutex,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    pretty_env_logger::init();
    log::info!("logger created");
    let config_path = std::env::args_os()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("config.toml"));
    let config = PluginConfig::load(&config_path);
    let plugin = match Plugin::with_default_commands(config) {
        Ok(plugin) => Arc::new(plugin),
        Err(e) => {
            log::error!("unable to seed rng: {}", e);
            std::process::exit(1);
        }
    };
    Console::new(plugin).run().await;
}

struct StdoutResponder {
    stdout: Mutex<Stdout>,
}

#[async_trait]
impl Responder for StdoutResponder {
    type Error = std::io::Error;

    async fn send_text(&self, text: String) -> Result<(), Self::Error> {
        let mut stdout = self.stdout.lock().await;
        stdout.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n").await?;
        }
        stdout.flush().await
    }
}

/// Reads chat messages from stdin, one per line, and answers on stdout.
struct Console {
    plugin: Arc<Plugin>,
    responder: Arc<StdoutResponder>,
}

impl Console {
    fn new(plugin: Arc<Plugin>) -> Console {
        Console {
            plugin,
            responder: Arc::new(StdoutResponder {
                stdout: Mutex::new(tokio::io::stdout()),
            }),
        }
    }

    async fn run(self) {
        let (stop_sender, stop_receiver) = tokio::sync::watch::channel(false);
        let reseed = tokio::task::spawn(reseed_periodically(
            self.plugin.rng(),
            self.plugin.config().rng.reseed_period(),
            stop_receiver,
        ));
        if !self.plugin.on_enable() {
            log::warn!("plugin disabled, messages will go unanswered");
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut tasks = Vec::new();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            let plugin = self.plugin.clone();
                            let responder = self.responder.clone();
                            tasks.push(tokio::task::spawn(async move {
                                plugin.respond(&line, responder.as_ref()).await;
                            }));
                        }
                        Ok(None) => {
                            log::info!("stdin closed: Shutting down");
                            break;
                        }
                        Err(e) => {
                            log::error!("Unable to read from stdin: {}", e);
                            break;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Received Ctrl-C: Shutting down");
                    break;
                }
            }
            tasks.retain(|task: &tokio::task::JoinHandle<()>| !task.is_finished());
        }

        for task in tasks {
            if let Err(e) = task.await {
                log::error!("command task failed: {}", e);
            }
        }
        if stop_sender.send(true).is_err() {
            log::warn!("reseeding task already stopped");
        }
        if let Err(e) = reseed.await {
            log::error!("reseeding task failed: {}", e);
        }
        self.plugin.on_disable();
    }
}
