use crate::assistant::IntentMatcher;
use crate::assistant::rules::{SUGGESTIONS, WELCOME};
use crate::assistant::session::{ChatSession, Sender};
use anyhow::{Context, Result};
use rand::Rng;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Cosmetic "thinking" pause before a reply is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    pub min: Duration,
    pub max: Duration,
}

impl ReplyDelay {
    pub const NONE: Self = Self {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..self.max)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    History,
    Help,
    Shortcut(&'static str),
    Text(&'a str),
}

fn interpret(line: &str) -> Input<'_> {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/history" => Input::History,
        "/help" => Input::Help,
        command => command
            .strip_prefix('/')
            .and_then(|index| index.parse::<usize>().ok())
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| SUGGESTIONS.get(index))
            .map_or(Input::Text(line), |&(_, text)| Input::Shortcut(text)),
    }
}

fn avatar(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "👤",
        Sender::Bot => "🤖",
    }
}

async fn write_message<W: AsyncWrite + Unpin>(output: &mut W, sender: Sender, text: &str) -> Result<()> {
    output
        .write_all(format!("{} {text}\n\n", avatar(sender)).as_bytes())
        .await
        .context("Failed to write chat output")
}

async fn write_suggestions<W: AsyncWrite + Unpin>(output: &mut W) -> Result<()> {
    let mut text = String::from("Suggestions:\n");
    for (index, (label, _)) in SUGGESTIONS.iter().enumerate() {
        text.push_str(&format!("  /{} {label}\n", index + 1));
    }
    text.push_str("  /history shows the conversation, /quit leaves.\n\n");

    output
        .write_all(text.as_bytes())
        .await
        .context("Failed to write chat output")
}

/// Runs one chat session until `/quit` or end of input.
pub async fn run<R, W>(
    matcher: &IntentMatcher,
    delay: ReplyDelay,
    input: R,
    mut output: W,
) -> Result<ChatSession>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = ChatSession::with_welcome(WELCOME);
    write_message(&mut output, Sender::Bot, WELCOME).await?;
    write_suggestions(&mut output).await?;
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read chat input")?
    {
        let text = match interpret(&line) {
            Input::Quit => break,
            Input::History => {
                for message in session.messages() {
                    write_message(&mut output, message.sender, &message.text).await?;
                }
                continue;
            }
            Input::Help => {
                write_suggestions(&mut output).await?;
                continue;
            }
            Input::Shortcut(text) => {
                write_message(&mut output, Sender::User, text).await?;
                text
            }
            Input::Text(text) => text,
        };

        let Some(text) = session.submit(text) else {
            continue;
        };

        let pause = delay.sample(&mut rand::thread_rng());
        if !pause.is_zero() {
            output.write_all("🤖 typing…\n".as_bytes()).await?;
            output.flush().await?;
            tokio::time::sleep(pause).await;
        }

        let reply = matcher.respond(&text);
        session.reply(reply);
        write_message(&mut output, Sender::Bot, reply).await?;
        output.flush().await?;
    }

    tracing::info!(messages = session.messages().len(), "Chat session ended");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn interprets_commands_and_shortcuts() {
        assert_eq!(interpret(" /quit "), Input::Quit);
        assert_eq!(interpret("/history"), Input::History);
        assert_eq!(interpret("/2"), Input::Shortcut("Suggest a dessert recipe"));
        assert_eq!(interpret("/0"), Input::Text("/0"));
        assert_eq!(interpret("/9"), Input::Text("/9"));
        assert_eq!(interpret("pasta?"), Input::Text("pasta?"));
    }

    #[test]
    fn delay_stays_in_range() {
        let delay = ReplyDelay {
            min: Duration::from_millis(1000),
            max: Duration::from_millis(2000),
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let pause = delay.sample(&mut rng);
            assert!(pause >= delay.min && pause < delay.max);
        }
        assert_eq!(ReplyDelay::NONE.sample(&mut rng), Duration::ZERO);
    }

    #[tokio::test]
    async fn scripted_conversation() {
        let matcher = IntentMatcher::default();
        let input: &[u8] = b"hello\n   \n/1\nbye\n/quit\nignored after quit\n";
        let mut output = Vec::new();

        let session = run(&matcher, ReplyDelay::NONE, input, &mut output)
            .await
            .unwrap();

        let senders: Vec<_> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            [
                Sender::Bot,
                Sender::User,
                Sender::Bot,
                Sender::User,
                Sender::Bot,
                Sender::User,
                Sender::Bot,
            ]
        );
        assert_eq!(session.messages()[3].text, "What can I make with chicken?");
        assert_eq!(session.messages()[4].text, matcher.respond("chicken"));
        assert!(session.messages()[6].text.starts_with("Goodbye!"));

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.starts_with("🤖 Hi! I'm your Recipe AI Assistant."));
        assert!(printed.contains("/1 🍗 Chicken recipes"));
        assert!(!printed.contains("ignored after quit"));
    }
}
