use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, DomainError, DomainResult, Entity, ValueObject};

/// Email address split into its local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email {
    local_part: String,
    domain: String,
}

impl ValueObject for Email {}

impl Email {
    /// Parse `local@domain`. Exactly one `@`, both sides non-empty, and the
    /// domain must contain a dot that is not at either end.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let raw = raw.trim();
        let (local_part, domain) = raw
            .split_once('@')
            .ok_or_else(|| DomainError::validation(format!("email '{raw}' has no '@'")))?;

        let domain_ok = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains('@');
        if local_part.is_empty() || !domain_ok {
            return Err(DomainError::validation(format!("email '{raw}' is malformed")));
        }

        Ok(Self {
            local_part: local_part.to_string(),
            domain: domain.to_string(),
        })
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn complete(&self) -> String {
        format!("{}@{}", self.local_part, self.domain)
    }
}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub street_name: String,
    pub house_number: String,
    pub postal_code: String,
    pub country: String,
}

impl ValueObject for Address {}

impl Address {
    fn is_complete(&self) -> bool {
        [
            &self.street_name,
            &self.house_number,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Phone number with its country calling code (e.g. "+32").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    pub country_calling_code: String,
}

impl ValueObject for PhoneNumber {}

impl PhoneNumber {
    fn is_complete(&self) -> bool {
        let digits_only = |s: &str| {
            let s = s.trim_start_matches('+');
            !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == ' ')
        };
        digits_only(&self.number) && digits_only(&self.country_calling_code)
    }
}

/// Parameters for registering a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub address: Address,
    pub phone_number: PhoneNumber,
}

/// Customer: identity plus contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: Email,
    address: Address,
    phone_number: PhoneNumber,
}

impl Customer {
    /// Validate and build a customer with a freshly generated id.
    pub fn new(params: NewCustomer) -> DomainResult<Self> {
        Self::with_id(CustomerId::new(), params)
    }

    pub fn with_id(id: CustomerId, params: NewCustomer) -> DomainResult<Self> {
        let customer = Self {
            id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            address: params.address,
            phone_number: params.phone_number,
        };

        let names_ok =
            !customer.first_name.trim().is_empty() && !customer.last_name.trim().is_empty();
        if !names_ok || !customer.address.is_complete() || !customer.phone_number.is_complete() {
            return Err(DomainError::invalid_entity(
                "creation of a new customer",
                &customer,
            ));
        }

        Ok(customer)
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
