use serde::Serialize;

/// Hard-coded sample flight, shown only when the search backend is
/// unreachable. Its fields are display-ready labels, not real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallbackFlight {
    pub route: &'static str,
    pub airline: &'static str,
    pub number: &'static str,
    pub departure: &'static str,
    pub from_code: &'static str,
    pub duration: &'static str,
    pub arrival: &'static str,
    pub to_code: &'static str,
    pub price: &'static str,
    pub seats: &'static str,
}

pub const SAMPLE_FLIGHTS: [FallbackFlight; 3] = [
    FallbackFlight {
        route: "New York → Los Angeles",
        airline: "American Airlines",
        number: "AA123",
        departure: "08:00 AM",
        from_code: "JFK",
        duration: "6h 0m",
        arrival: "11:00 AM",
        to_code: "LAX",
        price: "299.99",
        seats: "45",
    },
    FallbackFlight {
        route: "New York → London",
        airline: "British Airways",
        number: "BA456",
        departure: "06:30 PM",
        from_code: "JFK",
        duration: "7h 30m",
        arrival: "06:00 AM",
        to_code: "LHR",
        price: "599.99",
        seats: "12",
    },
    FallbackFlight {
        route: "Los Angeles → Dubai",
        airline: "Emirates",
        number: "EK789",
        departure: "10:15 PM",
        from_code: "LAX",
        duration: "15h 45m",
        arrival: "02:00 AM",
        to_code: "DXB",
        price: "899.99",
        seats: "28",
    },
];
