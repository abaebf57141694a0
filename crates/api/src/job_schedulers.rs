use crate::{reminder::SendRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep_until, Instant};
use barber_reminders_infra::ReminderContext;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Seconds to wait from `now_ts` (millis) until `secs_before_min` seconds
/// before the start of a minute
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

pub fn start_send_reminders_job(ctx: ReminderContext) {
    let every = Duration::from_secs(ctx.config.send_reminders_interval_secs);
    info!("Starting the send reminders job, running every {:?}", every);

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut sweep_interval = interval(every);
        // A slow sweep should not cause a burst of sweeps afterwards
        sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            sweep_interval.tick().await;
            // Sweeps never overlap, the next tick waits for this one to finish.
            // A failed sweep is already logged by `execute`.
            if let Ok(report) = execute(SendRemindersUseCase, &ctx).await {
                debug!(
                    "Scheduled sweep sent {} reminders, skipped {} barbershops",
                    report.sent, report.tenants_skipped
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
