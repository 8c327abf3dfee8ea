//! Staff API Handlers

use axum::extract::State;
use serde::Serialize;
use shared::error::ApiResponse;

use crate::api::AppJson;
use crate::auth::Caller;
use crate::error::ServiceResult;
use crate::staff::{
    CreateStaffCommand, PushTokenCommand, RemoveStaffCommand, SetActiveCommand,
    UpdateStaffCommand,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCreated {
    pub staff_id: String,
}

/// POST /api/staff/create - 创建员工
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    AppJson(cmd): AppJson<CreateStaffCommand>,
) -> ServiceResult<ApiResponse<StaffCreated>> {
    let input = cmd.validate()?;
    tracing::debug!(caller = %caller.uid, email = %input.email, "Create staff requested");

    let staff = state.staff_manager().create(input).await?;
    Ok(ApiResponse::success_with_message(
        format!("Utilisateur {} créé.", staff.display_name),
        StaffCreated { staff_id: staff.id },
    ))
}

/// POST /api/staff/update - 更新员工
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    AppJson(cmd): AppJson<UpdateStaffCommand>,
) -> ServiceResult<ApiResponse<()>> {
    let input = cmd.validate()?;
    tracing::debug!(caller = %caller.uid, staff_id = %input.staff_id, "Update staff requested");

    let display_name = input.display_name.clone();
    state.staff_manager().update(input).await?;
    Ok(ApiResponse::ok_with_message(format!(
        "Utilisateur {display_name} mis à jour."
    )))
}

/// POST /api/staff/set-active - 启用/停用员工
pub async fn set_active(
    State(state): State<AppState>,
    caller: Caller,
    AppJson(cmd): AppJson<SetActiveCommand>,
) -> ServiceResult<ApiResponse<()>> {
    let (staff_id, is_active) = cmd.validate()?;
    tracing::debug!(caller = %caller.uid, staff_id = %staff_id, is_active, "Set staff active requested");

    state.staff_manager().set_active(&staff_id, is_active).await?;
    let message = if is_active {
        "Utilisateur activé."
    } else {
        "Utilisateur désactivé."
    };
    Ok(ApiResponse::ok_with_message(message))
}

/// POST /api/staff/remove - 删除员工 (软删除)
pub async fn remove(
    State(state): State<AppState>,
    caller: Caller,
    AppJson(cmd): AppJson<RemoveStaffCommand>,
) -> ServiceResult<ApiResponse<()>> {
    let staff_id = cmd.validate()?;
    tracing::debug!(caller = %caller.uid, staff_id = %staff_id, "Remove staff requested");

    state.staff_manager().remove(&staff_id).await?;
    Ok(ApiResponse::ok_with_message("Utilisateur supprimé."))
}

/// PUT /api/staff/me/fcm-token - 登记当前员工的推送令牌
pub async fn register_push_token(
    State(state): State<AppState>,
    caller: Caller,
    AppJson(cmd): AppJson<PushTokenCommand>,
) -> ServiceResult<ApiResponse<()>> {
    let token = cmd.validate()?;
    state
        .staff_manager()
        .register_push_token(&caller.uid, token.as_deref())
        .await?;
    Ok(ApiResponse::ok())
}
