//! `console` logging module

use crate::registrar::ApiModule;
use rquickjs::convert::Coerced;
use rquickjs::function::Rest;
use rquickjs::{Ctx, Function, Object};
use std::rc::Rc;
use wasgi_services::{LogLevel, LogSink};

/// Sink target for guest console output.
pub const CONSOLE_TARGET: &str = "script";

const METHODS: [(&str, LogLevel); 5] = [
    ("log", LogLevel::Info),
    ("info", LogLevel::Info),
    ("debug", LogLevel::Debug),
    ("warn", LogLevel::Warn),
    ("error", LogLevel::Error),
];

/// Forwards `console.*` calls to the host log sink.
pub struct ConsoleApi {
    sink: Rc<dyn LogSink>,
}

impl ConsoleApi {
    pub fn new(sink: Rc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl ApiModule for ConsoleApi {
    fn name(&self) -> &str {
        "console"
    }

    fn populate<'js>(&self, ctx: &Ctx<'js>, target: &Object<'js>) -> rquickjs::Result<()> {
        for (method, level) in METHODS {
            let sink = Rc::clone(&self.sink);
            let func = Function::new(ctx.clone(), move |args: Rest<Coerced<String>>| {
                let line = args
                    .0
                    .iter()
                    .map(|arg| arg.0.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                sink.emit(level, CONSOLE_TARGET, &line);
            })?
            .with_name(method)?;
            target.set(method, func)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rquickjs::{Context, Runtime};
    use wasgi_services::MemorySink;

    fn run(source: &str) -> Rc<MemorySink> {
        let sink = Rc::new(MemorySink::new());
        let api = ConsoleApi::new(sink.clone());
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();

        context.with(|ctx| {
            let console = Object::new(ctx.clone()).unwrap();
            api.populate(&ctx, &console).unwrap();
            ctx.globals().set("console", console).unwrap();
            ctx.eval::<(), _>(source).unwrap();
        });
        sink
    }

    #[test]
    fn arguments_are_joined_with_spaces() {
        let sink = run("console.log('dt', 0.5, true, null)");
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "dt 0.5 true null");
        assert_eq!(records[0].level, LogLevel::Info);
        assert_eq!(records[0].target, CONSOLE_TARGET);
    }

    #[test]
    fn methods_map_to_levels() {
        let sink = run("console.debug('a'); console.warn('b'); console.error('c');");
        let levels: Vec<_> = sink.records().iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![LogLevel::Debug, LogLevel::Warn, LogLevel::Error]);
    }

    #[test]
    fn no_arguments_logs_an_empty_line() {
        let sink = run("console.info()");
        assert_eq!(sink.records()[0].message, "");
    }

    #[test]
    fn functions_carry_their_names() {
        let sink = run("console.log(console.warn.name)");
        assert_eq!(sink.records()[0].message, "warn");
    }
}
