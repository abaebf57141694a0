use crate::error::ApiError;
use crate::shared::{
    auth::protect_internal_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use barber_reminders_api_structs::send_reminders::APIResponse;
use barber_reminders_domain::{due_rule, render, Appointment, TenantConfig};
use barber_reminders_infra::ReminderContext;
use chrono::NaiveDateTime;
use tracing::{debug, error, info, warn};

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::GatewayNotConfigured | UseCaseError::StorageError => ApiError::InternalError,
    }
}

pub async fn send_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    protect_internal_route(&http_req, &ctx)?;

    execute(SendRemindersUseCase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Reminders processed".into(),
            })
        })
        .map_err(handle_error)
}

/// What happened to a single pending appointment during a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentOutcome {
    NotDue,
    /// Unparsable date or time, or no phone number
    Invalid,
    /// The gateway did not deliver the message, the appointment stays eligible
    DispatchFailed,
    Sent,
    /// Sent, but another sweep had already marked the appointment
    AlreadyMarked,
    /// Sent, but storing `reminder_sent_at` failed
    MarkFailed,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub tenants_processed: usize,
    pub tenants_skipped: usize,
    pub not_due: usize,
    pub invalid: usize,
    pub dispatch_failed: usize,
    pub sent: usize,
    pub already_marked: usize,
    pub mark_failed: usize,
}

impl SweepReport {
    fn record(&mut self, outcome: AppointmentOutcome) {
        let counter = match outcome {
            AppointmentOutcome::NotDue => &mut self.not_due,
            AppointmentOutcome::Invalid => &mut self.invalid,
            AppointmentOutcome::DispatchFailed => &mut self.dispatch_failed,
            AppointmentOutcome::Sent => &mut self.sent,
            AppointmentOutcome::AlreadyMarked => &mut self.already_marked,
            AppointmentOutcome::MarkFailed => &mut self.mark_failed,
        };
        *counter += 1;
    }
}

/// One pass over every barbershop, sending the reminders that are due right now
#[derive(Debug)]
pub struct SendRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    GatewayNotConfigured,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = SweepReport;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        if let Err(e) = ctx.gateway.check_config() {
            error!("Unable to send reminders: {}", e);
            return Err(UseCaseError::GatewayNotConfigured);
        }

        let tenant_ids = ctx.repos.tenants.find_all_ids().await.map_err(|e| {
            error!("Unable to list barbershops. Error: {:?}", e);
            UseCaseError::StorageError
        })?;

        let now = ctx.sys.now_local(&ctx.config.timezone);
        let mut report = SweepReport::default();
        for tenant_id in &tenant_ids {
            if process_tenant(ctx, tenant_id, now, &mut report).await {
                report.tenants_processed += 1;
            } else {
                report.tenants_skipped += 1;
            }
        }

        info!("Reminders sweep at {} done: {:?}", now, report);
        Ok(report)
    }
}

/// Returns `false` if the barbershop was skipped
async fn process_tenant(
    ctx: &ReminderContext,
    tenant_id: &str,
    now: NaiveDateTime,
    report: &mut SweepReport,
) -> bool {
    let tenant = match ctx.repos.tenants.find(tenant_id).await {
        Ok(Some(tenant)) => tenant,
        Ok(None) => {
            warn!("No configuration found for barbershop: {}", tenant_id);
            return false;
        }
        Err(e) => {
            error!(
                "Unable to load configuration of barbershop: {}. Error: {:?}",
                tenant_id, e
            );
            return false;
        }
    };

    let instance_name = tenant.instance_name();
    let connection = ctx.gateway.check_connection(&instance_name).await;
    if !connection.is_connected() {
        debug!(
            "Skipping barbershop: {} as WhatsApp is {}",
            tenant_id, connection.status
        );
        return false;
    }

    let appointments = match ctx
        .repos
        .appointments
        .find_pending(tenant_id, now.date())
        .await
    {
        Ok(appointments) => appointments,
        Err(e) => {
            error!(
                "Unable to fetch pending appointments of barbershop: {}. Error: {:?}",
                tenant_id, e
            );
            return false;
        }
    };

    for appointment in &appointments {
        let outcome = process_appointment(ctx, &tenant, &instance_name, appointment, now).await;
        report.record(outcome);
    }

    true
}

async fn process_appointment(
    ctx: &ReminderContext,
    tenant: &TenantConfig,
    instance_name: &str,
    appointment: &Appointment,
    now: NaiveDateTime,
) -> AppointmentOutcome {
    let scheduled_at = match appointment.scheduled_at() {
        Ok(scheduled_at) => scheduled_at,
        Err(e) => {
            warn!("Skipping appointment: {}. {}", appointment.id, e);
            return AppointmentOutcome::Invalid;
        }
    };

    let rule = match due_rule(scheduled_at, &tenant.reminders, now) {
        Some(rule) => rule,
        None => return AppointmentOutcome::NotDue,
    };

    let phone_number = match appointment.phone_digits() {
        Ok(phone_number) => phone_number,
        Err(e) => {
            warn!("Skipping appointment: {}. {}", appointment.id, e);
            return AppointmentOutcome::Invalid;
        }
    };

    info!(
        "Sending reminder for appointment: {} at {}, {} {:?} before",
        appointment.id, scheduled_at, rule.value, rule.unit
    );
    let text = render(&tenant.message_template, appointment);
    if !dispatch(ctx, instance_name, &phone_number, &text).await {
        return AppointmentOutcome::DispatchFailed;
    }

    match ctx
        .repos
        .appointments
        .mark_reminder_sent(appointment.id, ctx.sys.now_utc())
        .await
    {
        Ok(true) => AppointmentOutcome::Sent,
        Ok(false) => {
            warn!(
                "Reminder for appointment: {} was already marked as sent",
                appointment.id
            );
            AppointmentOutcome::AlreadyMarked
        }
        Err(e) => {
            error!(
                "Reminder for appointment: {} was sent but could not be marked. It might be sent again. Error: {:?}",
                appointment.id, e
            );
            AppointmentOutcome::MarkFailed
        }
    }
}

/// Sends the message if the instance is still connected. Never fails, returns
/// whether the message was accepted by the gateway.
async fn dispatch(ctx: &ReminderContext, instance_name: &str, phone_number: &str, text: &str) -> bool {
    let connection = ctx.gateway.check_connection(instance_name).await;
    if !connection.is_connected() {
        warn!(
            "Instance: {} is no longer connected ({}), message not sent",
            instance_name, connection.status
        );
        return false;
    }

    match ctx.gateway.send_text(instance_name, phone_number, text).await {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Unable to send message with instance: {} to: {}. Error: {}",
                instance_name, phone_number, e
            );
            false
        }
    }
}
