//! Built-in segment schemas (HL7 v2.5 field ordering).
//!
//! Each list names positions 1..n of the segment; position 0 is always the
//! segment type code and is exposed as [`SEGMENT_TYPE_KEY`](crate::SEGMENT_TYPE_KEY).

/// `(code, description, field names)` for every built-in schema.
pub(crate) const BUILTIN: &[(&str, &str, &[&str])] = &[
    ("MSH", "Message Header", MSH),
    ("EVN", "Event Type", EVN),
    ("PID", "Patient Identification", PID),
    ("PV1", "Patient Visit", PV1),
];

// MSH-1 is the field separator itself and MSH-2 the encoding characters.
const MSH: &[&str] = &[
    "FieldSeparator",
    "EncodingCharacters",
    "SendingApplication",
    "SendingFacility",
    "ReceivingApplication",
    "ReceivingFacility",
    "DateTimeOfMessage",
    "Security",
    "MessageType",
    "MessageControlID",
    "ProcessingID",
    "VersionID",
    "SequenceNumber",
    "ContinuationPointer",
    "AcceptAcknowledgmentType",
    "ApplicationAcknowledgmentType",
    "CountryCode",
    "CharacterSet",
    "PrincipalLanguageOfMessage",
    "AlternateCharacterSetHandlingScheme",
    "MessageProfileIdentifier",
];

const EVN: &[&str] = &[
    "EventTypeCode",
    "RecordedDateTime",
    "DateTimePlannedEvent",
    "EventReasonCode",
    "OperatorID",
    "EventOccurred",
    "EventFacility",
];

const PID: &[&str] = &[
    "SetID",
    "PatientID",
    "PatientIdentifierList",
    "AlternatePatientID",
    "PatientName",
    "MothersMaidenName",
    "DateTimeOfBirth",
    "AdministrativeSex",
    "PatientAlias",
    "Race",
    "PatientAddress",
    "CountyCode",
    "PhoneNumberHome",
    "PhoneNumberBusiness",
    "PrimaryLanguage",
    "MaritalStatus",
    "Religion",
    "PatientAccountNumber",
    "SSNNumber",
    "DriversLicenseNumber",
    "MothersIdentifier",
    "EthnicGroup",
    "BirthPlace",
    "MultipleBirthIndicator",
    "BirthOrder",
    "Citizenship",
    "VeteransMilitaryStatus",
    "Nationality",
    "PatientDeathDateAndTime",
    "PatientDeathIndicator",
    "IdentityUnknownIndicator",
    "IdentityReliabilityCode",
    "LastUpdateDateTime",
    "LastUpdateFacility",
    "SpeciesCode",
    "BreedCode",
    "Strain",
    "ProductionClassCode",
    "TribalCitizenship",
];

const PV1: &[&str] = &[
    "SetID",
    "PatientClass",
    "AssignedPatientLocation",
    "AdmissionType",
    "PreadmitNumber",
    "PriorPatientLocation",
    "AttendingDoctor",
    "ReferringDoctor",
    "ConsultingDoctor",
    "HospitalService",
    "TemporaryLocation",
    "PreadmitTestIndicator",
    "ReadmissionIndicator",
    "AdmitSource",
    "AmbulatoryStatus",
    "VIPIndicator",
    "AdmittingDoctor",
    "PatientType",
    "VisitNumber",
    "FinancialClass",
    "ChargePriceIndicator",
    "CourtesyCode",
    "CreditRating",
    "ContractCode",
    "ContractEffectiveDate",
    "ContractAmount",
    "ContractPeriod",
    "InterestCode",
    "TransferToBadDebtCode",
    "TransferToBadDebtDate",
    "BadDebtAgencyCode",
    "BadDebtTransferAmount",
    "BadDebtRecoveryAmount",
    "DeleteAccountIndicator",
    "DeleteAccountDate",
    "DischargeDisposition",
    "DischargedToLocation",
    "DietType",
    "ServicingFacility",
    "BedStatus",
    "AccountStatus",
    "PendingLocation",
    "PriorTemporaryLocation",
    "AdmitDateTime",
    "DischargeDateTime",
    "CurrentPatientBalance",
    "TotalCharges",
    "TotalAdjustments",
    "TotalPayments",
    "AlternateVisitID",
    "VisitIndicator",
    "OtherHealthcareProvider",
];
