//! Consumers of rendered instruction text.

/// Receives the complete text of one rendered instruction.
///
/// Called exactly once per successful render and never for a failed one.
pub trait OutputSink {
    /// Accepts the finished text.
    fn on_output(&mut self, text: &str);
}

/// Keeps only the most recent instruction.
impl OutputSink for String {
    fn on_output(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Collects every instruction in delivery order.
impl OutputSink for Vec<String> {
    fn on_output(&mut self, text: &str) {
        self.push(text.to_owned());
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn on_output(&mut self, text: &str) {
        (**self).on_output(text);
    }
}

/// Adapts a closure into an [`OutputSink`].
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F: FnMut(&str)> OutputSink for FnSink<F> {
    fn on_output(&mut self, text: &str) {
        (self.0)(text);
    }
}
