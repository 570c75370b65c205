use chrono::Utc;
use rand::Rng;

/// Issues task ids: a base-36 millisecond time component followed by a
/// base-36 random component.
///
/// The time component never repeats or goes backwards within one generator,
/// even if the wall clock does.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator::default()
    }

    /// Produce the next id
    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let time = self.next_time(now);
        let random: u64 = rand::rng().random();
        format!("{}{}", to_base36(time), to_base36(random))
    }

    fn next_time(&mut self, now: u64) -> u64 {
        let time = if now > self.last_millis {
            now
        } else {
            self.last_millis + 1
        };
        self.last_millis = time;
        time
    }
}

/// Lowercase base-36 rendering of `n`
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
