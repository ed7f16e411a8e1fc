use super::value_to_i64;
use crate::error::{Bil24Error, Result};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenueType {
    Theater,
    ConcertHall,
    Stadium,
    Club,
    OpenAir,
    #[default]
    Other,
}

impl VenueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueType::Theater => "theater",
            VenueType::ConcertHall => "concert_hall",
            VenueType::Stadium => "stadium",
            VenueType::Club => "club",
            VenueType::OpenAir => "open_air",
            VenueType::Other => "other",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "theater" => Some(VenueType::Theater),
            "concert_hall" => Some(VenueType::ConcertHall),
            "stadium" => Some(VenueType::Stadium),
            "club" => Some(VenueType::Club),
            "open_air" => Some(VenueType::OpenAir),
            "other" => Some(VenueType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenueStatus {
    #[default]
    Active,
    Inactive,
    UnderConstruction,
    Closed,
}

impl VenueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueStatus::Active => "active",
            VenueStatus::Inactive => "inactive",
            VenueStatus::UnderConstruction => "under_construction",
            VenueStatus::Closed => "closed",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(VenueStatus::Active),
            "inactive" => Some(VenueStatus::Inactive),
            "under_construction" => Some(VenueStatus::UnderConstruction),
            "closed" => Some(VenueStatus::Closed),
            _ => None,
        }
    }
}

/// A physical location where sessions take place.
///
/// Unlike the other models, coordinate setters return an error on
/// out-of-range input instead of clamping. That asymmetry matches the
/// remote platform and is kept on purpose.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Venue {
    id: Option<i64>,
    bil24_id: Option<i64>,
    name: String,
    address: String,
    city: String,
    country: String,
    postal_code: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    capacity: u32,
    venue_type: VenueType,
    status: VenueStatus,
    timezone: Option<String>,
    amenities: Vec<String>,
    accessibility_features: Vec<String>,
}

impl Venue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a venue from a JSON map. Out-of-range coordinates abort
    /// construction; everything else follows the usual ignore/clamp rules.
    pub fn from_value(data: &Value) -> Result<Self> {
        let mut venue = Self::default();
        if let Some(map) = data.as_object() {
            for (key, value) in map {
                venue.apply(key, value)?;
            }
        }
        Ok(venue)
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<()> {
        match key {
            "id" => self.id = value_to_i64(value),
            "bil24_id" => self.bil24_id = value_to_i64(value),
            "name" => {
                if let Some(s) = value.as_str() {
                    self.set_name(s);
                }
            }
            "address" => {
                if let Some(s) = value.as_str() {
                    self.set_address(s);
                }
            }
            "city" => {
                if let Some(s) = value.as_str() {
                    self.set_city(s);
                }
            }
            "country" => {
                if let Some(s) = value.as_str() {
                    self.set_country(s);
                }
            }
            "postal_code" => {
                if let Some(s) = value.as_str() {
                    self.set_postal_code(s);
                }
            }
            "latitude" => {
                if let Some(lat) = value.as_f64() {
                    self.set_latitude(lat)?;
                }
            }
            "longitude" => {
                if let Some(lon) = value.as_f64() {
                    self.set_longitude(lon)?;
                }
            }
            "capacity" => {
                if let Some(c) = value_to_i64(value) {
                    self.set_capacity(c);
                }
            }
            "venue_type" => {
                if let Some(s) = value.as_str() {
                    self.set_venue_type(s);
                }
            }
            "status" => {
                if let Some(s) = value.as_str() {
                    self.set_status(s);
                }
            }
            "timezone" => {
                if let Some(s) = value.as_str() {
                    self.set_timezone(s);
                }
            }
            "amenities" => {
                if let Some(items) = value.as_array() {
                    for item in items.iter().filter_map(|v| v.as_str()) {
                        self.add_amenity(item);
                    }
                }
            }
            "accessibility_features" => {
                if let Some(items) = value.as_array() {
                    for item in items.iter().filter_map(|v| v.as_str()) {
                        self.add_accessibility_feature(item);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "bil24_id": self.bil24_id,
            "name": self.name,
            "address": self.address,
            "city": self.city,
            "country": self.country,
            "postal_code": self.postal_code,
            "latitude": self.latitude,
            "longitude": self.longitude,
            "capacity": self.capacity,
            "venue_type": self.venue_type.as_str(),
            "status": self.status.as_str(),
            "timezone": self.timezone,
            "amenities": self.amenities,
            "accessibility_features": self.accessibility_features,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn bil24_id(&self) -> Option<i64> {
        self.bil24_id
    }

    pub fn set_bil24_id(&mut self, id: Option<i64>) {
        self.bil24_id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.trim().to_string();
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: &str) {
        self.city = city.trim().to_string();
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn set_country(&mut self, country: &str) {
        self.country = country.trim().to_string();
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn set_postal_code(&mut self, postal_code: &str) {
        self.postal_code = postal_code.trim().to_string();
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn set_latitude(&mut self, latitude: f64) -> Result<()> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Bil24Error::Validation(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        self.latitude = Some(latitude);
        Ok(())
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<()> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Bil24Error::Validation(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        self.longitude = Some(longitude);
        Ok(())
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: i64) {
        self.capacity = capacity.max(0) as u32;
    }

    pub fn venue_type(&self) -> VenueType {
        self.venue_type
    }

    pub fn set_venue_type(&mut self, venue_type: &str) {
        if let Some(venue_type) = VenueType::parse(venue_type) {
            self.venue_type = venue_type;
        }
    }

    pub fn status(&self) -> VenueStatus {
        self.status
    }

    pub fn set_status(&mut self, status: &str) {
        if let Some(status) = VenueStatus::parse(status) {
            self.status = status;
        }
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// Only names on the IANA timezone list are accepted.
    pub fn set_timezone(&mut self, timezone: &str) {
        if timezone.parse::<chrono_tz::Tz>().is_ok() {
            self.timezone = Some(timezone.to_string());
        }
    }

    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    /// Deduplicated, insertion-ordered.
    pub fn add_amenity(&mut self, amenity: &str) {
        let amenity = amenity.trim();
        if !amenity.is_empty() && !self.amenities.iter().any(|a| a == amenity) {
            self.amenities.push(amenity.to_string());
        }
    }

    pub fn remove_amenity(&mut self, amenity: &str) {
        self.amenities.retain(|a| a != amenity);
    }

    pub fn accessibility_features(&self) -> &[String] {
        &self.accessibility_features
    }

    pub fn add_accessibility_feature(&mut self, feature: &str) {
        let feature = feature.trim();
        if !feature.is_empty() && !self.accessibility_features.iter().any(|f| f == feature) {
            self.accessibility_features.push(feature.to_string());
        }
    }

    pub fn remove_accessibility_feature(&mut self, feature: &str) {
        self.accessibility_features.retain(|f| f != feature);
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.city.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.city)
        }
    }
}
