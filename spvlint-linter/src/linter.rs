//! The check scheduler.

use std::{
    any::Any,
    cell::Cell,
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

use spvlint_core::{Consumer, Diagnostic, Outcome};
use spvlint_module::Module;
use tracing::{debug, warn};

use crate::{Check, CheckKind, Registry, resolve};

/// Schedules checks and runs them over a module.
///
/// Selection and execution are separate steps: flags can be turned into a
/// schedule before any input is read.
///
/// # Example
///
/// ```ignore
/// let mut linter = Linter::new();
/// linter.schedule_checks(vec![CheckKind::All]);
///
/// let module = Module::open("shader.spv")?;
/// let outcome = linter.run(&module, &mut StreamConsumer::stderr());
/// if outcome.has_errors() {
///     // ...
/// }
/// ```
pub struct Linter {
    registry: Registry,
    pending: Vec<CheckKind>,
}

impl Linter {
    /// Create a linter backed by the built-in checks.
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin())
    }

    /// Create a linter backed by a custom set of checks.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            pending: Vec::new(),
        }
    }

    /// Replace the pending work with the expansion of `requested`.
    ///
    /// Meta kinds are expanded and repeats dropped, keeping the position of
    /// the first occurrence.
    pub fn schedule_checks(&mut self, requested: Vec<CheckKind>) {
        self.pending = resolve(requested);
        debug!(checks = ?self.pending, "scheduled checks");
    }

    /// The concrete checks that [`run`](Self::run) will execute, in order.
    pub fn scheduled(&self) -> &[CheckKind] {
        &self.pending
    }

    /// Run every scheduled check against `module`.
    ///
    /// Diagnostics are forwarded to `consumer` as soon as a check yields
    /// them. A check that fails is reported with one error diagnostic and
    /// the remaining checks still run.
    pub fn run(&self, module: &Module, consumer: &mut dyn Consumer) -> Outcome {
        let mut outcome = Outcome::new();
        for &kind in &self.pending {
            match self.registry.get(kind) {
                Some(check) => run_check(check, module, consumer, &mut outcome),
                None => {
                    warn!(check = kind.name(), "no implementation registered");
                    outcome.emit(
                        consumer,
                        Diagnostic::error(format!(
                            "no implementation is registered for check '{}'",
                            kind
                        ))
                        .origin(kind.name()),
                    );
                }
            }
        }
        outcome
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

fn run_check(
    check: &dyn Check,
    module: &Module,
    consumer: &mut dyn Consumer,
    outcome: &mut Outcome,
) {
    let name = check.name();
    debug!(check = name, description = check.description(), "running check");

    let mut findings = match isolated(|| check.analyze(module)) {
        Ok(findings) => findings,
        Err(payload) => {
            report_failure(name, &panic_message(payload.as_ref()), consumer, outcome);
            return;
        }
    };

    let mut produced = 0usize;
    loop {
        match isolated(|| findings.next()) {
            Ok(Some(Ok(diagnostic))) => {
                produced += 1;
                let diagnostic = match diagnostic.origin {
                    Some(_) => diagnostic,
                    None => diagnostic.origin(name),
                };
                outcome.emit(consumer, diagnostic);
            }
            Ok(Some(Err(err))) => {
                report_failure(name, &format!("{:#}", err), consumer, outcome);
                break;
            }
            Ok(None) => break,
            Err(payload) => {
                report_failure(name, &panic_message(payload.as_ref()), consumer, outcome);
                break;
            }
        }
    }

    debug!(check = name, findings = produced, "check finished");
}

thread_local! {
    static IN_CHECK: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Run `f` with panics caught and kept off stderr.
///
/// The installed hook wraps whatever hook was active before (color-eyre's in
/// the binary) and stays silent only while the current thread is inside a
/// check. The panic is reported as a check failure instead.
fn isolated<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_CHECK.with(Cell::get) {
                previous(info);
            }
        }));
    });

    IN_CHECK.with(|flag| flag.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    IN_CHECK.with(|flag| flag.set(false));
    result
}

fn report_failure(name: &str, reason: &str, consumer: &mut dyn Consumer, outcome: &mut Outcome) {
    warn!(check = name, reason, "check failed");
    outcome.emit(
        consumer,
        Diagnostic::error(format!("check '{}' could not complete: {}", name, reason)).origin(name),
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use spvlint_core::Severity;
    use spvlint_module::{op, testing::ModuleBuilder};

    use super::*;
    use crate::Findings;

    /// Emits a fixed list of diagnostics and counts how often it ran.
    struct Stub {
        kind: CheckKind,
        emits: Vec<Diagnostic>,
        runs: Arc<AtomicUsize>,
    }

    impl Stub {
        fn new(kind: CheckKind, emits: Vec<Diagnostic>) -> (Self, Arc<AtomicUsize>) {
            let runs = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    kind,
                    emits,
                    runs: runs.clone(),
                },
                runs,
            )
        }
    }

    impl Check for Stub {
        fn kind(&self) -> CheckKind {
            self.kind
        }
        fn description(&self) -> &'static str {
            "stub"
        }
        fn analyze<'m>(&self, _module: &'m Module) -> Findings<'m> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Box::new(self.emits.clone().into_iter().map(Ok::<_, eyre::Report>))
        }
    }

    /// Yields one diagnostic, then fails.
    struct Failing;

    impl Check for Failing {
        fn kind(&self) -> CheckKind {
            CheckKind::Derivatives
        }
        fn description(&self) -> &'static str {
            "fails halfway"
        }
        fn analyze<'m>(&self, _module: &'m Module) -> Findings<'m> {
            Box::new(
                vec![
                    Ok(Diagnostic::info("partial result")),
                    Err(eyre::eyre!("unexpected operand layout")),
                    Ok(Diagnostic::info("never seen")),
                ]
                .into_iter(),
            )
        }
    }

    struct Panicking;

    impl Check for Panicking {
        fn kind(&self) -> CheckKind {
            CheckKind::Derivatives
        }
        fn description(&self) -> &'static str {
            "panics"
        }
        fn analyze<'m>(&self, _module: &'m Module) -> Findings<'m> {
            panic!("invariant broken")
        }
    }

    fn module() -> Module {
        ModuleBuilder::new().build()
    }

    #[test]
    fn test_schedule_expands_and_deduplicates() {
        let mut linter = Linter::new();
        linter.schedule_checks(vec![CheckKind::Undefs, CheckKind::All, CheckKind::Undefs]);
        assert_eq!(
            linter.scheduled(),
            &[CheckKind::Undefs, CheckKind::Derivatives]
        );
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let mut linter = Linter::new();
        linter.schedule_checks(vec![CheckKind::All]);
        linter.schedule_checks(vec![CheckKind::Undefs]);
        assert_eq!(linter.scheduled(), &[CheckKind::Undefs]);
    }

    #[test]
    fn test_nothing_scheduled() {
        let linter = Linter::new();
        let mut sink: Vec<Diagnostic> = Vec::new();

        let outcome = linter.run(&module(), &mut sink);

        assert!(sink.is_empty());
        assert_eq!(outcome, Outcome::new());
    }

    #[test]
    fn test_each_check_runs_once() {
        let (derivatives, derivative_runs) = Stub::new(CheckKind::Derivatives, vec![]);
        let (undefs, undef_runs) = Stub::new(CheckKind::Undefs, vec![]);
        let registry = Registry::empty().with_check(derivatives).with_check(undefs);

        let mut linter = Linter::with_registry(registry);
        linter.schedule_checks(vec![
            CheckKind::Derivatives,
            CheckKind::All,
            CheckKind::Undefs,
            CheckKind::Derivatives,
        ]);
        let _ = linter.run(&module(), &mut Vec::<Diagnostic>::new());

        assert_eq!(derivative_runs.load(Ordering::SeqCst), 1);
        assert_eq!(undef_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_only_selected_checks_run() {
        let (derivatives, derivative_runs) = Stub::new(CheckKind::Derivatives, vec![]);
        let (undefs, undef_runs) = Stub::new(CheckKind::Undefs, vec![]);
        let registry = Registry::empty().with_check(derivatives).with_check(undefs);

        let mut linter = Linter::with_registry(registry);
        linter.schedule_checks(vec![CheckKind::Undefs]);
        let _ = linter.run(&module(), &mut Vec::<Diagnostic>::new());

        assert_eq!(derivative_runs.load(Ordering::SeqCst), 0);
        assert_eq!(undef_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_error_does_not_stop_siblings() {
        let (derivatives, _) = Stub::new(
            CheckKind::Derivatives,
            vec![Diagnostic::error("derivative in vertex shader")],
        );
        let (undefs, undef_runs) = Stub::new(
            CheckKind::Undefs,
            vec![Diagnostic::warning("undefined value stored")],
        );
        let registry = Registry::empty().with_check(derivatives).with_check(undefs);

        let mut linter = Linter::with_registry(registry);
        linter.schedule_checks(vec![CheckKind::All]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        let outcome = linter.run(&module(), &mut sink);

        assert!(outcome.has_errors());
        assert_eq!(undef_runs.load(Ordering::SeqCst), 1);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].origin.as_deref(), Some("derivatives"));
        assert_eq!(sink[1].origin.as_deref(), Some("undefs"));
        assert_eq!(sink[1].severity, Severity::Warning);
    }

    #[test]
    fn test_diagnostics_follow_schedule_order() {
        let (derivatives, _) = Stub::new(CheckKind::Derivatives, vec![Diagnostic::info("d")]);
        let (undefs, _) = Stub::new(CheckKind::Undefs, vec![Diagnostic::info("u")]);
        let registry = Registry::empty().with_check(derivatives).with_check(undefs);

        let mut linter = Linter::with_registry(registry);
        linter.schedule_checks(vec![CheckKind::Undefs, CheckKind::Derivatives]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        let _ = linter.run(&module(), &mut sink);

        let messages: Vec<&str> = sink.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["u", "d"]);
    }

    #[test]
    fn test_failing_check_is_isolated() {
        let (undefs, undef_runs) = Stub::new(CheckKind::Undefs, vec![Diagnostic::info("fine")]);
        let registry = Registry::empty().with_check(Failing).with_check(undefs);

        let mut linter = Linter::with_registry(registry);
        linter.schedule_checks(vec![CheckKind::All]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        let outcome = linter.run(&module(), &mut sink);

        let messages: Vec<&str> = sink.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "partial result",
                "check 'derivatives' could not complete: unexpected operand layout",
                "fine",
            ]
        );
        assert_eq!(outcome.error_count(), 1);
        assert_eq!(undef_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_isolated_silences_only_inside_check() {
        assert!(isolated(|| IN_CHECK.with(Cell::get)).unwrap());

        let payload = isolated(|| -> usize { panic!("boom") }).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "panicked: boom");
        assert!(!IN_CHECK.with(Cell::get));
        assert_eq!(isolated(|| 7).ok(), Some(7));
    }

    #[test]
    fn test_panicking_check_is_isolated() {
        let (undefs, undef_runs) = Stub::new(CheckKind::Undefs, vec![]);
        let registry = Registry::empty().with_check(Panicking).with_check(undefs);

        let mut linter = Linter::with_registry(registry);
        linter.schedule_checks(vec![CheckKind::All]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        let outcome = linter.run(&module(), &mut sink);

        assert_eq!(sink.len(), 1);
        assert!(sink[0].severity.is_error());
        assert!(sink[0].message.contains("invariant broken"));
        assert!(outcome.has_errors());
        assert_eq!(undef_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_implementation_is_reported() {
        let mut linter = Linter::with_registry(Registry::empty());
        linter.schedule_checks(vec![CheckKind::Undefs]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        let outcome = linter.run(&module(), &mut sink);

        assert!(outcome.has_errors());
        assert!(sink[0].message.contains("'undefs'"));
    }

    #[test]
    fn test_builtin_checks_on_clean_module() {
        let module = ModuleBuilder::new()
            .entry_point(op::model::FRAGMENT, 4, "main")
            .function(4)
            .inst(op::DPDX, &[1, 10, 9])
            .function_end()
            .build();

        let mut linter = Linter::new();
        linter.schedule_checks(vec![CheckKind::All]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        let outcome = linter.run(&module, &mut sink);

        assert!(sink.is_empty());
        assert!(!outcome.has_errors());
    }
}
