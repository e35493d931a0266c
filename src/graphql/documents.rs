//! Query and mutation documents sent to the rental backend.

// Manufacturers

pub const GET_MANUFACTURERS: &str = r#"
query GetManufacturers($offset: Int, $limit: Int) {
  getManufacturers(offset: $offset, limit: $limit) {
    manufacturers {
      id
      name
      country
    }
    totalCount
  }
}
"#;

pub const ADD_MANUFACTURER: &str = r#"
mutation AddManufacturer($name: String!, $country: String!) {
  addManufacturer(name: $name, country: $country) {
    id
    name
    country
  }
}
"#;

pub const EDIT_MANUFACTURER: &str = r#"
mutation EditManufacturer($id: String!, $name: String, $country: String) {
  editManufacturer(id: $id, name: $name, country: $country) {
    id
    name
    country
  }
}
"#;

pub const DELETE_MANUFACTURER: &str = r#"
mutation DeleteManufacturer($id: String!) {
  deleteManufacturer(id: $id)
}
"#;

// Cars

pub const GET_CARS: &str = r#"
query GetCars($offset: Int, $limit: Int) {
  getCars(pagination: { offset: $offset, limit: $limit }) {
    cars {
      id
      name
      type
      description
      transmissionType
      fuelType
      numberOfSeats
      quantity
      primaryImageUrl
      secondaryImagesUrls
      year
      manufacturer {
        name
      }
    }
    total
    hasMore
  }
}
"#;

pub const GET_CAR_BY_ID: &str = r#"
query GetCarById($id: String!) {
  getCarById(id: $id) {
    id
    name
    type
    description
    fuelType
    numberOfSeats
    transmissionType
    quantity
    primaryImageUrl
    secondaryImagesUrls
    year
  }
}
"#;

pub const ADD_CAR: &str = r#"
mutation AddCar(
  $name: String!
  $type: String!
  $numberOfSeats: Int!
  $fuelType: String!
  $transmissionType: String!
  $description: String!
  $quantity: Int!
  $manufacturerId: String!
  $primaryImage: Upload!
  $secondaryImages: [Upload!]!
) {
  addCar(
    input: {
      name: $name
      type: $type
      numberOfSeats: $numberOfSeats
      fuelType: $fuelType
      transmissionType: $transmissionType
      description: $description
      quantity: $quantity
      manufacturerId: $manufacturerId
    }
    primaryImage: $primaryImage
    secondaryImages: $secondaryImages
  ) {
    id
    name
    type
    numberOfSeats
    fuelType
    transmissionType
    description
    quantity
    primaryImageUrl
    secondaryImagesUrls
  }
}
"#;

pub const ADD_CAR_BY_EXCEL: &str = r#"
mutation AddCarByExcel($excelFile: Upload!) {
  addCarByExcel(excelFile: $excelFile) {
    id
    name
  }
}
"#;

pub const DELETE_CAR: &str = r#"
mutation DeleteCar($id: String!) {
  deleteCar(id: $id)
}
"#;

// Rentable inventory

pub const GET_RENTABLE_CARS: &str = r#"
query GetRentableCars($offset: Int, $limit: Int) {
  getRentableCars(offset: $offset, limit: $limit) {
    rentableCars {
      id
      carId
      pricePerDay
      availableQuantity
      car {
        id
        name
        type
        description
        year
        transmissionType
        fuelType
        numberOfSeats
        quantity
        primaryImageUrl
        manufacturer {
          id
          name
          country
        }
      }
    }
    totalCount
  }
}
"#;

pub const ADD_RENTABLE_CAR: &str = r#"
mutation AddRentable($input: RentableInput!) {
  addRentable(input: $input) {
    id
    carId
    pricePerDay
    availableQuantity
  }
}
"#;

pub const UPDATE_RENTABLE_CAR: &str = r#"
mutation UpdateRentableCar($id: String!, $input: UpdateRentableInput!) {
  updateRentableCar(id: $id, input: $input) {
    id
    carId
    pricePerDay
    availableQuantity
  }
}
"#;

pub const DELETE_RENTABLE_CAR: &str = r#"
mutation DeleteRentableCar($id: String!) {
  deleteRentableCar(id: $id)
}
"#;

// Bookings

pub const FETCH_ALL_BOOKINGS: &str = r#"
query FetchAllBookings($filters: BookingFilterInput) {
  fetchAllBookings(filters: $filters) {
    status
    message
    data {
      id
      carId
      userId
      pickUpDate
      pickUpTime
      dropOffDate
      dropOffTime
      pickUpLocation
      dropOffLocation
      address
      phoneNumber
      totalPrice
      status
      rentable {
        id
        pricePerDay
        availableQuantity
        car {
          name
          manufacturer {
            name
          }
        }
      }
      user {
        id
      }
    }
  }
}
"#;

pub const FETCH_BOOKINGS_PAGE: &str = r#"
query FetchBookingsPage($offset: Int, $limit: Int) {
  fetchBookingsPage(offset: $offset, limit: $limit) {
    status
    message
    data {
      bookings {
        id
        pickUpDate
        dropOffDate
        totalPrice
        status
        rentable {
          id
          pricePerDay
          availableQuantity
          car {
            name
            manufacturer {
              name
            }
          }
        }
      }
      totalCount
    }
  }
}
"#;

pub const BOOKING_DELIVERY: &str = r#"
mutation BookingDelivery($id: String!) {
  bookingDelivery(id: $id) {
    status
    message
    updatedBooking {
      id
      status
      deliveryDate
    }
  }
}
"#;

pub const EXPORT_BOOKINGS_EXCEL: &str = r#"
mutation ExportBookingsExcel {
  exportBookingsExcel {
    status
    message
    data {
      buffer
      filename
    }
  }
}
"#;

pub const EXPORT_BOOKINGS_PDF: &str = r#"
mutation ExportBookingsPDF {
  exportBookingsPDF {
    status
    message
    data {
      buffer
      filename
    }
  }
}
"#;

// Session

pub const ADMIN_LOGIN: &str = r#"
mutation AdminLogin($email: String!, $password: String!) {
  adminLogin(email: $email, password: $password) {
    token
    admin {
      id
      name
      email
    }
  }
}
"#;

// Search index passthrough

pub const ADD_CAR_TO_TYPESENSE: &str = r#"
mutation AddCarToTypesense($car: TypesenseCarInput!) {
  addCarToTypesense(car: $car)
}
"#;
