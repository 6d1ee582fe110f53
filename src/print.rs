//! Print trigger
//!
//! The emergency styling is not meant for paper, so it is lifted between the
//! browser's `beforeprint` and `afterprint` events. Mobile browsers return
//! from `window.print()` before the page is captured, so restoring is left
//! to `afterprint` rather than done when the call returns.

use std::cell::Cell;

use crate::error::Result;
use crate::platform::ModeSurface;

/// Suppresses the emergency class for the duration of a print
pub struct PrintSuppressor<P> {
    surface: P,
    suppressed: Cell<bool>,
}

impl<P: ModeSurface> PrintSuppressor<P> {
    pub fn new(surface: P) -> Self {
        Self {
            surface,
            suppressed: Cell::new(false),
        }
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    /// Whether the class is currently lifted for printing
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.get()
    }

    /// `beforeprint`: lift the class if it is applied. Repeated calls are no-ops.
    pub fn before_print(&self) {
        if !self.suppressed.get() && self.surface.has_mode_class() {
            self.surface.set_mode_class(false);
            self.suppressed.set(true);
        }
    }

    /// `afterprint`: put the class back if this suppressor removed it
    pub fn after_print(&self) {
        if self.suppressed.replace(false) {
            self.surface.set_mode_class(true);
        }
    }

    /// Print via `print`, lifting the class first.
    ///
    /// On success the class stays lifted until [`PrintSuppressor::after_print`];
    /// if `print` fails no `afterprint` will follow, so it is restored here.
    pub fn print<F>(&self, print: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        self.before_print();
        let result = print();
        if result.is_err() {
            self.after_print();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mode::test_support::RecordingSurface;

    fn suppressor(class_on: bool) -> PrintSuppressor<RecordingSurface> {
        let surface = RecordingSurface::default();
        surface.class_on.set(class_on);
        PrintSuppressor::new(surface)
    }

    #[test]
    fn test_class_suppressed_until_afterprint() {
        let printer = suppressor(true);

        // a non-blocking print returns before the page is captured
        printer.print(|| Ok(())).unwrap();
        assert!(!printer.surface().class_on.get());
        assert!(printer.is_suppressed());

        printer.after_print();
        assert!(printer.surface().class_on.get());
        assert!(!printer.is_suppressed());
    }

    #[test]
    fn test_blocking_print_restored_by_afterprint_inside_call() {
        let printer = suppressor(true);
        printer
            .print(|| {
                assert!(!printer.surface().class_on.get());
                // blocking browsers fire both events while print() runs
                printer.before_print();
                printer.after_print();
                Ok(())
            })
            .unwrap();
        assert!(printer.surface().class_on.get());
        assert!(!printer.is_suppressed());
    }

    #[test]
    fn test_menu_print_events_alone() {
        let printer = suppressor(true);
        printer.before_print();
        printer.before_print();
        assert!(!printer.surface().class_on.get());
        printer.after_print();
        printer.after_print();
        assert!(printer.surface().class_on.get());
    }

    #[test]
    fn test_untouched_when_mode_off() {
        let printer = suppressor(false);
        printer.print(|| Ok(())).unwrap();
        printer.after_print();
        assert!(!printer.surface().class_on.get());
    }

    #[test]
    fn test_restored_after_failed_print() {
        let printer = suppressor(true);
        let result = printer.print(|| Err(Error::js("print", "blocked")));
        assert!(result.is_err());
        assert!(printer.surface().class_on.get());
        assert!(!printer.is_suppressed());
    }
}
