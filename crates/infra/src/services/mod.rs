mod notifier;

pub use notifier::{DisabledNotifier, INotifier, InMemoryNotifier, MailjetNotifier, SentMessage};
