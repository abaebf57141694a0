mod helpers;

use barber_reminders_domain::{Appointment, TenantConfig, WhatsappConnection};
use barber_reminders_sdk::{
    APIError, ConnectionStatus, EvolutionWebhookEvent, ReminderRule, ReminderSDK, ReminderUnit,
    SendReminderInput, StatusCode, UpdateSettingsInput,
};
use helpers::setup::{spawn_app, TestApp};

fn appointment(id: i64, tenant_id: &str, time: &str) -> Appointment {
    Appointment {
        id,
        tenant_id: tenant_id.into(),
        date: "2024-01-10".into(),
        time: time.into(),
        customer_name: "Ana".into(),
        customer_phone: "+55 11 98888-7777".into(),
        service_name: "Haircut".into(),
        staff_name: "Bob".into(),
        shop_name: Some("Sharp".into()),
        reminder_sent_at: None,
        status: None,
    }
}

async fn connected_barbershop(app: &TestApp, tenant_id: &str) -> TenantConfig {
    let mut tenant = TenantConfig::new(tenant_id);
    tenant.message_template = "Hi {{name}}, {{service}} with {{staff}} at {{time}}".into();
    tenant.reminders = vec![ReminderRule::new(1, ReminderUnit::Hours)];
    app.ctx.repos.tenants.save(&tenant).await.unwrap();
    app.gateway.set_connection(
        &tenant.instance_name(),
        WhatsappConnection::connected("5511000000000".into()),
    );
    tenant
}

#[actix_web::test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::test]
async fn test_protected_routes_need_the_internal_key() {
    let (app, _, address) = spawn_app().await;

    let anonymous = ReminderSDK::new(address.clone(), "");
    assert!(anonymous.status.check_health().await.is_ok());
    assert_eq!(
        anonymous.reminder.send_due().await.err(),
        Some(APIError::UnexpectedStatusCode(StatusCode::UNAUTHORIZED))
    );
    assert_eq!(
        anonymous.whatsapp.get_settings("1").await.err(),
        Some(APIError::UnexpectedStatusCode(StatusCode::UNAUTHORIZED))
    );

    let admin = ReminderSDK::new(address, app.config.internal_api_key.clone());
    assert!(admin.whatsapp.get_settings("1").await.is_ok());
}

#[actix_web::test]
async fn test_cron_sends_due_reminders_once() {
    let (app, sdk, _) = spawn_app().await;
    connected_barbershop(&app, "1").await;
    let appointments = &app.ctx.repos.appointments;
    // Due, the trigger was at 14:00
    appointments
        .insert(&appointment(1, "1", "15:00"))
        .await
        .unwrap();
    // Not due yet
    appointments
        .insert(&appointment(2, "1", "16:00"))
        .await
        .unwrap();

    assert!(sdk.reminder.send_due().await.is_ok());
    let sent = app.gateway.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].instance_name, "barbershop-1");
    assert_eq!(sent[0].phone_number, "5511988887777");
    assert_eq!(sent[0].text, "Hi Ana, Haircut with Bob at 15:00");
    assert!(appointments
        .find(1)
        .await
        .unwrap()
        .reminder_sent_at
        .is_some());
    assert!(appointments
        .find(2)
        .await
        .unwrap()
        .reminder_sent_at
        .is_none());

    // Running again right away sends nothing new
    assert!(sdk.reminder.send_due().await.is_ok());
    assert_eq!(app.gateway.sent_messages().len(), 1);
}

#[actix_web::test]
async fn test_cron_skips_disconnected_barbershops() {
    let (app, sdk, _) = spawn_app().await;
    connected_barbershop(&app, "1").await;
    let disconnected = connected_barbershop(&app, "2").await;
    app.gateway.set_connection(
        &disconnected.instance_name(),
        WhatsappConnection::with_status(ConnectionStatus::Disconnected),
    );
    let appointments = &app.ctx.repos.appointments;
    appointments
        .insert(&appointment(1, "1", "15:00"))
        .await
        .unwrap();
    appointments
        .insert(&appointment(2, "2", "15:00"))
        .await
        .unwrap();

    assert!(sdk.reminder.send_due().await.is_ok());
    let sent = app.gateway.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].instance_name, "barbershop-1");
    assert!(appointments
        .find(2)
        .await
        .unwrap()
        .reminder_sent_at
        .is_none());
}

#[actix_web::test]
async fn test_settings_are_created_and_updated() {
    let (_, sdk, _) = spawn_app().await;

    let settings = sdk
        .whatsapp
        .get_settings("1")
        .await
        .expect("To get default settings");
    assert_eq!(
        settings.reminders,
        vec![ReminderRule::new(24, ReminderUnit::Hours)]
    );
    assert!(settings.message_template.contains("{{name}}"));

    let res = sdk
        .whatsapp
        .update_settings(UpdateSettingsInput {
            barbershop_id: "1".into(),
            message_template: "See you {{date}}".into(),
            reminders: vec![
                ReminderRule::new(2, ReminderUnit::Days),
                ReminderRule::new(30, ReminderUnit::Minutes),
            ],
        })
        .await
        .expect("To update settings");
    assert!(res.success);
    assert_eq!(res.config.barbershop_id, "1");
    assert_eq!(res.config.connection_status, ConnectionStatus::Disconnected);

    let settings = sdk.whatsapp.get_settings("1").await.unwrap();
    assert_eq!(settings.message_template, "See you {{date}}");
    assert_eq!(settings.reminders.len(), 2);

    let res = sdk
        .whatsapp
        .update_settings(UpdateSettingsInput {
            barbershop_id: "1".into(),
            message_template: "".into(),
            reminders: vec![],
        })
        .await;
    assert_eq!(
        res.err(),
        Some(APIError::UnexpectedStatusCode(StatusCode::BAD_REQUEST))
    );
}

#[actix_web::test]
async fn test_status_is_checked_and_stored() {
    let (app, sdk, _) = spawn_app().await;
    app.gateway.set_connection(
        "barbershop-1",
        WhatsappConnection::connected("5511999999999".into()),
    );

    let connection = sdk.whatsapp.get_status("1").await.expect("To get status");
    assert_eq!(connection.status, ConnectionStatus::Connected);
    assert_eq!(connection.phone_number, Some("5511999999999".into()));

    let stored = app.ctx.repos.tenants.find("1").await.unwrap().unwrap();
    assert_eq!(stored.connection_status, ConnectionStatus::Connected);
}

#[actix_web::test]
async fn test_send_single_reminder() {
    let (app, sdk, _) = spawn_app().await;
    let input = || SendReminderInput {
        barbershop_id: "1".into(),
        instance_name: "barbershop-1".into(),
        phone_number: "5511977776666".into(),
        message: "Your chair is ready".into(),
    };

    assert_eq!(
        sdk.reminder.send(input()).await.err(),
        Some(APIError::UnexpectedStatusCode(
            StatusCode::SERVICE_UNAVAILABLE
        ))
    );

    app.gateway.set_connection(
        "barbershop-1",
        WhatsappConnection::connected("5511000000000".into()),
    );
    let res = sdk.reminder.send(input()).await.expect("To send message");
    assert!(res.success);
    assert_eq!(app.gateway.sent_messages().len(), 1);

    app.gateway.fail_sends_to("5511977776666");
    assert_eq!(
        sdk.reminder.send(input()).await.err(),
        Some(APIError::UnexpectedStatusCode(
            StatusCode::INTERNAL_SERVER_ERROR
        ))
    );

    let mut empty = input();
    empty.message = "".into();
    assert_eq!(
        sdk.reminder.send(empty).await.err(),
        Some(APIError::UnexpectedStatusCode(StatusCode::BAD_REQUEST))
    );
}

#[actix_web::test]
async fn test_webhook_is_accepted_without_key() {
    let (_, _, address) = spawn_app().await;
    let anonymous = ReminderSDK::new(address, "");

    let res = anonymous
        .reminder
        .notify_webhook(EvolutionWebhookEvent {
            event: Some("connection.update".into()),
            instance: Some("barbershop-1".into()),
        })
        .await
        .expect("To accept webhook");
    assert!(res.success);
}
