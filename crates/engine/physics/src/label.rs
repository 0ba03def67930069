//! Lock-state label hook

/// Something that can display the lock state, e.g. a UI text element
pub trait LockLabel {
    fn show(&mut self, text: &str);
}

/// Label that displays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLabel;

impl LockLabel for NullLabel {
    fn show(&mut self, _text: &str) {}
}

/// Keeps the most recent text; handy for headless hosts and tests
impl LockLabel for String {
    fn show(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

impl<L: LockLabel + ?Sized> LockLabel for &mut L {
    fn show(&mut self, text: &str) {
        (**self).show(text)
    }
}
