use cosmwasm_schema::cw_serde;

/// Hardware model of a signing device
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum DeviceModel {
    NanoS,
    NanoSp,
    NanoX,
    Stax,
}

/// Handle to a device connection owned by the component that opened it.
///
/// The handle only identifies the connection; holders never close it.
#[cw_serde]
#[serde(deny_unknown_fields)]
#[derive(Eq, Hash)]
pub struct Device {
    pub device_id: String,
    pub model_id: DeviceModel,
    /// USB when true, bluetooth otherwise
    pub wired: bool,
}

impl Device {
    pub fn new(device_id: impl Into<String>, model_id: DeviceModel, wired: bool) -> Self {
        Self {
            device_id: device_id.into(),
            model_id,
            wired,
        }
    }
}
