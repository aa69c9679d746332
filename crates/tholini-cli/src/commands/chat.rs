use std::path::PathBuf;

use clap::Subcommand;
use tholini_core::{ChatClient, ChatRequest, ImageAttachment};

use super::{CommandResult, Context};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message and/or a skin photo
    Send {
        /// Question for the assistant
        #[arg(long, short)]
        message: Option<String>,
        /// Path to an image to attach
        #[arg(long, short)]
        image: Option<PathBuf>,
        /// Print the raw reply as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ChatAction, ctx: &Context) -> CommandResult {
    match action {
        ChatAction::Send { message, image, json } => {
            let image = image
                .map(|path| ImageAttachment::from_path(&path))
                .transpose()?;
            let client = ChatClient::from_config(&ctx.config.chat)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let reply = runtime.block_on(client.send(ChatRequest::new(message, image)))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                println!("{}", reply.response);
            }
        }
    }
    Ok(())
}
