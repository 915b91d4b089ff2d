use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wellcheck_core::breathing::{BreathPhase, BreathingSchedule, PhaseFrame};

struct RunningCycle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Guided 4-7-8 breathing: Inspire, Hold, Expire, repeat until stopped.
///
/// Frames are published on a watch channel; the view animates towards each
/// frame's target scale.
pub struct BreathingTimer {
    schedule: BreathingSchedule,
    frames: watch::Sender<PhaseFrame>,
    running: Option<RunningCycle>,
}

impl BreathingTimer {
    pub fn new(schedule: BreathingSchedule) -> Self {
        let (frames, _) = watch::channel(schedule.frame(BreathPhase::Idle));
        Self {
            schedule,
            frames,
            running: None,
        }
    }

    pub fn schedule(&self) -> &BreathingSchedule {
        &self.schedule
    }

    pub fn phase(&self) -> BreathPhase {
        self.frames.borrow().phase
    }

    pub fn frame(&self) -> PhaseFrame {
        *self.frames.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PhaseFrame> {
        self.frames.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Starts a fresh cycle at Inspire. A cycle already running is torn down
    /// first so timers never stack.
    pub fn start(&mut self) {
        self.cancel_running();

        let cancel = CancellationToken::new();
        self.frames.send_replace(self.schedule.frame(BreathPhase::Inspire));

        let task = tokio::spawn(run_cycle(self.schedule, self.frames.clone(), cancel.clone()));
        self.running = Some(RunningCycle { cancel, task });
        log::info!("breathing exercise started");
    }

    /// Cancels every pending phase change and settles back to rest.
    pub fn stop(&mut self) {
        if self.cancel_running() {
            log::info!("breathing exercise stopped");
        }
        self.frames.send_replace(self.schedule.frame(BreathPhase::Idle));
    }

    fn cancel_running(&mut self) -> bool {
        match self.running.take() {
            Some(cycle) => {
                cycle.cancel.cancel();
                cycle.task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for BreathingTimer {
    fn drop(&mut self) {
        self.cancel_running();
    }
}

async fn run_cycle(
    schedule: BreathingSchedule,
    frames: watch::Sender<PhaseFrame>,
    cancel: CancellationToken,
) {
    let mut phase = BreathPhase::Inspire;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(schedule.phase_duration(phase)) => {}
        }

        phase = phase.next();
        let frame = schedule.frame(phase);
        // Checked under the channel lock so a concurrent stop always wins.
        frames.send_if_modified(|current| {
            if cancel.is_cancelled() {
                return false;
            }
            *current = frame;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[tokio::test(start_paused = true)]
    async fn follows_four_seven_eight_schedule() {
        let mut timer = BreathingTimer::new(BreathingSchedule::default());
        assert_eq!(timer.phase(), BreathPhase::Idle);

        timer.start();
        assert_eq!(timer.phase(), BreathPhase::Inspire);

        sleep(ms(3_990)).await;
        assert_eq!(timer.phase(), BreathPhase::Inspire);
        sleep(ms(20)).await;
        assert_eq!(timer.phase(), BreathPhase::Hold);

        // Hold ends at 11s.
        sleep(ms(6_980)).await;
        assert_eq!(timer.phase(), BreathPhase::Hold);
        sleep(ms(20)).await;
        assert_eq!(timer.phase(), BreathPhase::Expire);

        // Expire ends at 19s and the cycle restarts.
        sleep(ms(7_980)).await;
        assert_eq!(timer.phase(), BreathPhase::Expire);
        sleep(ms(20)).await;
        assert_eq!(timer.phase(), BreathPhase::Inspire);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_pending_transitions() {
        let mut timer = BreathingTimer::new(BreathingSchedule::default());
        let mut rx = timer.subscribe();

        timer.start();
        sleep(ms(5_000)).await;
        assert_eq!(timer.phase(), BreathPhase::Hold);

        timer.stop();
        let frame = timer.frame();
        assert_eq!(frame.phase, BreathPhase::Idle);
        assert_eq!(frame.target_scale, wellcheck_core::breathing::REST_SCALE);
        assert_eq!(frame.transition_ms, 500);
        assert!(!timer.is_running());

        let _ = rx.borrow_and_update();
        sleep(ms(60_000)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(timer.phase(), BreathPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_does_not_stack_cycles() {
        let mut timer = BreathingTimer::new(BreathingSchedule::default());
        timer.start();
        sleep(ms(3_000)).await;

        // Restart 3s into the first cycle; only the new schedule may fire.
        timer.start();
        sleep(ms(1_500)).await;
        assert_eq!(timer.phase(), BreathPhase::Inspire);

        sleep(ms(2_510)).await;
        assert_eq!(timer.phase(), BreathPhase::Hold);
    }
}
