//! Output handlers: structured log lines and JSON lines.

use crate::eventbus::GestureHandler;
use crate::gesture::Gesture;
use std::io::Write;

/// Logs every gesture at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct GestureLogger;

impl GestureLogger {
    pub fn new() -> Self {
        GestureLogger
    }
}

impl GestureHandler for GestureLogger {
    fn on_gesture(&mut self, gesture: &Gesture) {
        tracing::info!(
            kind = gesture.kind.as_str(),
            direction = gesture.direction.as_str(),
            fingers = gesture.fingers,
            "{gesture}"
        );
    }
}

/// Writes one JSON object per gesture, newline-terminated, flushing after each.
///
/// Write failures are logged and otherwise ignored so a closed pipe never stops
/// the router.
pub struct JsonLinesWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_gesture(&mut self, gesture: &Gesture) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, gesture)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> GestureHandler for JsonLinesWriter<W> {
    fn on_gesture(&mut self, gesture: &Gesture) {
        if let Err(e) = self.write_gesture(gesture) {
            tracing::warn!("failed to write gesture: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Direction;

    #[test]
    fn json_lines_output() {
        let mut w = JsonLinesWriter::new(Vec::new());
        w.on_gesture(&Gesture::swipe(Direction::Right, 3));
        w.on_gesture(&Gesture::pinch(Direction::Out, 2));
        let text = String::from_utf8(w.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"kind":"swipe","direction":"right","fingers":3}"#,
                r#"{"kind":"pinch","direction":"out","fingers":2}"#,
            ]
        );
    }
}
