use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        self.elapsed += self.start.unwrap().elapsed();
        self.start = None;
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[derive(Debug, Default)]
struct SubTimersMap(HashMap<&'static str, InnerTimer>);

impl Deref for SubTimersMap {
    type Target = HashMap<&'static str, InnerTimer>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for SubTimersMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl SubTimersMap {
    fn start_subtimer(&mut self, key: &'static str) {
        let t = self.0.entry(key).or_default();
        t.start();
    }

    fn total_time(&self) -> Duration {
        self.values()
            .fold(Duration::ZERO, |acc, t| acc + t.elapsed())
    }

    fn elapsed(&self, key: &'static str) -> Option<Duration> {
        self.get(key).map(|t| t.elapsed())
    }

    fn print(&self, depth: u8, f: &mut dyn std::io::Write) -> std::io::Result<()> {
        for (key, val) in self.iter() {
            let tabs = format!("{: <1$}", "", 4 * depth as usize);
            writeln!(f, "{}{:} : {:?}", tabs, *key, val.elapsed)?;
            val.subtimers.print(depth + 1, f)?;
        }
        Ok(())
    }
}

/// A stack of named, nestable accumulating timers.
///
/// Starting a timer while another is active registers it as a subtimer
/// of the active one; `stop_current` pops the innermost active timer.
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        if self.stack.is_empty() {
            return None;
        }

        //first one gets special treatment since self is not
        //an InnerTimer and a common trait would be overkill
        let key = &self.stack[0];
        let mut active_timer = self.subtimers.get_mut(key).unwrap();

        for key in self.stack.iter().skip(1) {
            active_timer = active_timer.subtimers.get_mut(key).unwrap();
        }
        Some(active_timer)
    }

    pub fn start_as_current(&mut self, key: &'static str) {
        //starts a timer with name "str" as the current timer

        let active_timer = self.mut_active_timer();

        if let Some(active) = active_timer {
            // child of current active timer
            active.subtimers.start_subtimer(key);
        } else {
            // nothing active, create one at root
            self.subtimers.start_subtimer(key);
        }

        //append to timer call stack
        self.stack.push(key);
    }

    pub fn stop_current(&mut self) {
        //stops the current timer.  There should always be one
        // active when this function is reached.
        let active_timer = self.mut_active_timer();
        active_timer.unwrap().stop();

        //remove from timer call stack
        self.stack.pop();
    }

    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    /// Accumulated time of a root-level timer, if it has ever run.
    pub fn elapsed(&self, key: &'static str) -> Option<Duration> {
        self.subtimers.elapsed(key)
    }

    pub fn write_report(&self, f: &mut dyn std::io::Write) -> std::io::Result<()> {
        self.subtimers.print(0, f)
    }
}

macro_rules! timeit {
    ($timer:expr => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nested_timers() {
        let mut timers = Timers::default();

        timers.start_as_current("outer");
        timers.start_as_current("inner");
        std::thread::sleep(Duration::from_millis(2));
        timers.stop_current();
        timers.stop_current();

        assert!(timers.elapsed("outer").unwrap() >= Duration::from_millis(2));
        assert!(timers.elapsed("inner").is_none()); //not at root level
        assert!(timers.total_time() >= Duration::from_millis(2));
    }

    #[test]
    fn test_timeit_macro() {
        let mut timers = Timers::default();
        let mut x = 0;
        timeit! {timers => "work";
            x += 1;
        }
        assert_eq!(x, 1);
        assert!(timers.elapsed("work").is_some());
    }
}
