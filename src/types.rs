/// One tracked vehicle: the key used in `/voice/:key` requests and the
/// license plate used to query the upstream positions API.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub key: String,
    pub plate: String,
}
