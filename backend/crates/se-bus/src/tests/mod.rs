mod broadcast_message;
mod event_type;
mod update_notifier;
