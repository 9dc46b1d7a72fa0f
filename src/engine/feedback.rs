/// Shows a message to the person using the form.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Prints notifications to stdout, one block per message.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}
