use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_sms::SmsClient;
use shared_state::AppState;

use crate::models::{
    Appointment, AppointmentError, AppointmentListParams, AppointmentStatus,
    BookAppointmentRequest, BookAppointmentResponse,
};

const COLUMNS: &str = "id, doctor_id, clinic_id, doctor_name, appointment_date, \
                       time_slot, patient_name, patient_phone, status, created_at";

/// Doctor resolved together with its owning clinic; one read feeds both the
/// denormalized insert and the notification texts.
#[derive(Debug, FromRow)]
struct DoctorWithClinic {
    doctor_name: String,
    clinic_id: Uuid,
    clinic_name: String,
    clinic_phone: Option<String>,
}

pub struct BookingService {
    pool: PgPool,
    sms: SmsClient,
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            sms: state.sms.clone(),
        }
    }

    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<BookAppointmentResponse, AppointmentError> {
        let doctor = sqlx::query_as::<_, DoctorWithClinic>(
            "SELECT d.name AS doctor_name, c.id AS clinic_id,
                    c.name AS clinic_name, c.phone AS clinic_phone
             FROM doctors d
             JOIN clinics c ON c.id = d.clinic_id
             WHERE d.id = $1",
        )
        .bind(request.doctor_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppointmentError::DoctorNotFound)?;

        let query = format!(
            "INSERT INTO appointments
                (id, doctor_id, clinic_id, doctor_name, appointment_date,
                 time_slot, patient_name, patient_phone, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let appointment = sqlx::query_as::<_, Appointment>(&query)
            .bind(Uuid::new_v4())
            .bind(request.doctor_id)
            .bind(doctor.clinic_id)
            .bind(&doctor.doctor_name)
            .bind(request.appointment_date)
            .bind(&request.time_slot)
            .bind(&request.patient_name)
            .bind(&request.patient_phone)
            .bind(AppointmentStatus::Confirmed.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                // The partial unique index rejects a second active booking for
                // the same doctor/date/slot.
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppointmentError::SlotTaken
                }
                _ => AppointmentError::Database(e),
            })?;

        info!(
            "Appointment {} booked with {} on {} at {}",
            appointment.id, appointment.doctor_name, appointment.appointment_date,
            appointment.time_slot
        );

        let sms_status = self.notify(&appointment, &doctor).await;

        Ok(BookAppointmentResponse {
            appointment,
            sms_status,
        })
    }

    /// Confirmation texts to the patient and, when a number is on file, the
    /// clinic. Failures are logged and folded into the status flag; the stored
    /// booking stands regardless.
    async fn notify(&self, appointment: &Appointment, doctor: &DoctorWithClinic) -> &'static str {
        let patient_message = format!(
            "Dear {}, your appointment with {} at {} on {} at {} is confirmed.",
            appointment.patient_name,
            appointment.doctor_name,
            doctor.clinic_name,
            appointment.appointment_date,
            appointment.time_slot
        );

        let mut ok = match self.sms.send(&appointment.patient_phone, &patient_message).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Patient confirmation SMS failed for {}: {}", appointment.id, e);
                false
            }
        };

        if let Some(clinic_phone) = &doctor.clinic_phone {
            let clinic_message = format!(
                "New appointment: {} ({}) booked {} on {} at {}.",
                appointment.patient_name,
                appointment.patient_phone,
                appointment.doctor_name,
                appointment.appointment_date,
                appointment.time_slot
            );
            if let Err(e) = self.sms.send(clinic_phone, &clinic_message).await {
                warn!("Clinic notification SMS failed for {}: {}", appointment.id, e);
                ok = false;
            }
        }

        if ok {
            "success"
        } else {
            "failed"
        }
    }

    pub async fn list(
        &self,
        params: AppointmentListParams,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        if let Some(status) = &params.status {
            status.parse::<AppointmentStatus>()?;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM appointments
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::uuid IS NULL OR doctor_id = $2)
             ORDER BY appointment_date, time_slot"
        );
        let appointments = sqlx::query_as::<_, Appointment>(&query)
            .bind(&params.status)
            .bind(params.doctor_id)
            .fetch_all(&self.pool)
            .await?;
        debug!("Listed {} appointments", appointments.len());
        Ok(appointments)
    }

    /// Slots already taken for a doctor on a date. Cancelled bookings release
    /// their slot.
    pub async fn booked_slots(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>, AppointmentError> {
        let slots: Vec<String> = sqlx::query_scalar(
            "SELECT time_slot FROM appointments
             WHERE doctor_id = $1 AND appointment_date = $2 AND status <> 'cancelled'
             ORDER BY time_slot",
        )
        .bind(doctor_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(slots)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Appointment, AppointmentError> {
        let status = status.parse::<AppointmentStatus>()?;

        let query = format!(
            "UPDATE appointments SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let appointment = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        info!("Appointment {} moved to {}", id, status);
        Ok(appointment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppointmentError> {
        let deleted = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppointmentError::NotFound);
        }
        info!("Appointment {} deleted", id);
        Ok(())
    }
}
