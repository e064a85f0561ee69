pub mod notifier;

pub use notifier::WebsocketNotifier;
