//! The spec tree: descriptions, examples, fixtures, and hooks.
//!
//! Declaration and execution are separate phases. `describe` runs its body
//! closure immediately, building an immutable tree of groups and examples in
//! declaration order; running the tree later (any number of times, from any
//! number of independent runners) only ever borrows it.

use std::rc::Rc;

use crate::expectation::{self, PositiveHandler};
use crate::location::SourceLocation;
use crate::matchers::Matcher;
use crate::report::Report;

pub mod example;
pub mod fixture;

pub use example::Scope;
pub use fixture::Let;

use example::It;

pub(crate) type Hook = Rc<dyn Fn()>;

/// A container spec-tree node grouping related examples.
pub struct Description {
    label: String,
    location: SourceLocation,
    children: Vec<Node>,
    before_all: Vec<Hook>,
    before_each: Vec<Hook>,
    after_each: Vec<Hook>,
    after_all: Vec<Hook>,
}

pub(crate) enum Node {
    Group(Description),
    Example(It),
}

impl Description {
    fn new(label: String, location: SourceLocation) -> Self {
        Self {
            label,
            location,
            children: Vec::new(),
            before_all: Vec::new(),
            before_each: Vec::new(),
            after_each: Vec::new(),
            after_all: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Executes every child in declaration order and folds their reports
    /// into a container report.
    pub fn run(&self) -> Report {
        let mut ctx = RunContext {
            fail_fast: false,
            halted: false,
        };
        self.run_inner(&mut ctx, &HookChain::default())
    }

    pub(crate) fn run_inner(&self, ctx: &mut RunContext, inherited: &HookChain) -> Report {
        for hook in &self.before_all {
            hook();
        }

        let chain = inherited.extended(self);
        let mut children = Vec::with_capacity(self.children.len());
        for node in &self.children {
            match node {
                Node::Group(group) => children.push(group.run_inner(ctx, &chain)),
                Node::Example(example) => {
                    if ctx.halted {
                        children.push(example.skipped("not run (fail-fast)"));
                        continue;
                    }
                    chain.run_before();
                    let report = example.run();
                    chain.run_after();
                    if ctx.fail_fast && report.counts().has_failures() {
                        ctx.halted = true;
                    }
                    children.push(report);
                }
            }
        }

        for hook in &self.after_all {
            hook();
        }

        Report::group(self.label.clone(), Some(self.location), children)
    }
}

/// Traversal state threaded through one run.
pub(crate) struct RunContext {
    pub(crate) fail_fast: bool,
    pub(crate) halted: bool,
}

/// `before_each`/`after_each` hooks accumulated from the root down. Before
/// hooks run outermost-first, after hooks innermost-first.
#[derive(Clone, Default)]
pub(crate) struct HookChain {
    before: Vec<Hook>,
    after: Vec<Hook>,
}

impl HookChain {
    fn extended(&self, description: &Description) -> Self {
        let mut chain = self.clone();
        chain.before.extend(description.before_each.iter().cloned());
        chain.after.extend(description.after_each.iter().cloned());
        chain
    }

    fn run_before(&self) {
        for hook in &self.before {
            hook();
        }
    }

    fn run_after(&self) {
        for hook in self.after.iter().rev() {
            hook();
        }
    }
}

/// Builds a root description. The body runs immediately; the returned tree
/// is immutable.
#[track_caller]
pub fn describe(label: impl Into<String>, body: impl FnOnce(&mut Context)) -> Description {
    let mut ctx = Context::new(label.into(), SourceLocation::capture());
    body(&mut ctx);
    ctx.desc
}

/// Builds a root description whose examples share a subject fixture,
/// reconstructed for every example.
#[track_caller]
pub fn describe_subject<T: 'static>(
    label: impl Into<String>,
    factory: impl Fn() -> T + 'static,
    body: impl FnOnce(&mut SubjectContext<T>),
) -> Description {
    let mut ctx = SubjectContext {
        ctx: Context::new(label.into(), SourceLocation::capture()),
        subject: Let::from_nullary(factory),
    };
    body(&mut ctx);
    ctx.ctx.desc
}

/// Declaration-phase handle for one description under construction.
pub struct Context {
    desc: Description,
}

impl Context {
    pub(crate) fn new(label: String, location: SourceLocation) -> Self {
        Self {
            desc: Description::new(label, location),
        }
    }

    /// Appends an example.
    #[track_caller]
    pub fn it(&mut self, label: impl Into<String>, block: impl Fn(&mut Scope) + 'static) {
        self.push_example(Some(label.into()), SourceLocation::capture(), block);
    }

    /// Appends an example whose description is generated from its first
    /// evaluated expectation.
    #[track_caller]
    pub fn it_anon(&mut self, block: impl Fn(&mut Scope) + 'static) {
        self.push_example(None, SourceLocation::capture(), block);
    }

    /// Appends a nested context.
    #[track_caller]
    pub fn context(&mut self, label: impl Into<String>, body: impl FnOnce(&mut Context)) {
        let mut child = Context::new(label.into(), SourceLocation::capture());
        body(&mut child);
        self.desc.children.push(Node::Group(child.desc));
    }

    /// Appends a nested context whose examples share a subject fixture.
    #[track_caller]
    pub fn subject<T: 'static>(
        &mut self,
        label: impl Into<String>,
        factory: impl Fn() -> T + 'static,
        body: impl FnOnce(&mut SubjectContext<T>),
    ) {
        let mut child = SubjectContext {
            ctx: Context::new(label.into(), SourceLocation::capture()),
            subject: Let::from_nullary(factory),
        };
        body(&mut child);
        self.desc.children.push(Node::Group(child.ctx.desc));
    }

    /// Declares a lazily constructed fixture memoized per example.
    pub fn let_fixture<T: 'static>(&self, factory: impl Fn() -> T + 'static) -> Let<T> {
        Let::from_nullary(factory)
    }

    /// Declares a fixture whose factory may resolve other fixtures through
    /// the scope; each link of the chain is memoized per example.
    pub fn let_derived<T: 'static>(
        &self,
        factory: impl Fn(&mut Scope) -> T + 'static,
    ) -> Let<T> {
        Let::new(factory)
    }

    /// Runs once when this description group starts.
    pub fn before_all(&mut self, hook: impl Fn() + 'static) {
        self.desc.before_all.push(Rc::new(hook));
    }

    /// Runs before every descendant example, outermost hooks first.
    pub fn before_each(&mut self, hook: impl Fn() + 'static) {
        self.desc.before_each.push(Rc::new(hook));
    }

    /// Runs after every descendant example, innermost hooks first.
    pub fn after_each(&mut self, hook: impl Fn() + 'static) {
        self.desc.after_each.push(Rc::new(hook));
    }

    /// Runs once when this description group ends.
    pub fn after_all(&mut self, hook: impl Fn() + 'static) {
        self.desc.after_all.push(Rc::new(hook));
    }

    fn push_example(
        &mut self,
        label: Option<String>,
        location: SourceLocation,
        block: impl Fn(&mut Scope) + 'static,
    ) {
        self.desc.children.push(Node::Example(It {
            label,
            location,
            block: Box::new(block),
        }));
    }
}

/// Declaration-phase handle for a description with a subject fixture. The
/// subject is re-resolved, and therefore freshly constructed, for each
/// example.
pub struct SubjectContext<T> {
    ctx: Context,
    subject: Let<T>,
}

impl<T: 'static> SubjectContext<T> {
    /// Appends an example receiving the per-example subject instance.
    #[track_caller]
    pub fn it(&mut self, label: impl Into<String>, block: impl Fn(&mut Scope, &T) + 'static) {
        let subject = self.subject.clone();
        self.ctx.it(label, move |scope| {
            let current = subject.resolve(scope);
            block(scope, &current);
        });
    }

    /// Appends an auto-described example receiving the subject.
    #[track_caller]
    pub fn it_anon(&mut self, block: impl Fn(&mut Scope, &T) + 'static) {
        let subject = self.subject.clone();
        self.ctx.it_anon(move |scope| {
            let current = subject.resolve(scope);
            block(scope, &current);
        });
    }

    /// Appends an auto-described example asserting the subject against the
    /// matcher; its description becomes e.g. `should equal 4`.
    #[track_caller]
    pub fn specify<M>(&mut self, matcher: M)
    where
        T: Clone,
        M: Matcher<T> + 'static,
    {
        let location = SourceLocation::capture();
        let subject = self.subject.clone();
        self.ctx.it_anon(move |scope| {
            let current = subject.resolve(scope);
            let actual: T = (*current).clone();
            expectation::apply::<PositiveHandler, T, M>(scope, location, &actual, &matcher, None);
        });
    }

    /// Appends a nested context sharing the same subject.
    #[track_caller]
    pub fn context(&mut self, label: impl Into<String>, body: impl FnOnce(&mut SubjectContext<T>)) {
        let mut child = SubjectContext {
            ctx: Context::new(label.into(), SourceLocation::capture()),
            subject: self.subject.clone(),
        };
        body(&mut child);
        self.ctx.desc.children.push(Node::Group(child.ctx.desc));
    }

    /// Declares an additional fixture alongside the subject.
    pub fn let_fixture<U: 'static>(&self, factory: impl Fn() -> U + 'static) -> Let<U> {
        Let::from_nullary(factory)
    }

    /// Declares a fixture whose factory may resolve other fixtures.
    pub fn let_derived<U: 'static>(
        &self,
        factory: impl Fn(&mut Scope) -> U + 'static,
    ) -> Let<U> {
        Let::new(factory)
    }

    pub fn before_all(&mut self, hook: impl Fn() + 'static) {
        self.ctx.before_all(hook);
    }

    pub fn before_each(&mut self, hook: impl Fn() + 'static) {
        self.ctx.before_each(hook);
    }

    pub fn after_each(&mut self, hook: impl Fn() + 'static) {
        self.ctx.after_each(hook);
    }

    pub fn after_all(&mut self, hook: impl Fn() + 'static) {
        self.ctx.after_all(hook);
    }
}
